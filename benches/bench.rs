// Criterion benchmarks for Spinfood Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use spinfood_algo::core::{
    arrangement::generate_arrangements, distance::haversine_distance, GroupFormationEngine,
    PairingEngine, Planner,
};
use spinfood_algo::models::{
    FoodPreference, Gender, Kitchen, KitchenAvailability, Location, PairId, Participant,
};

fn party() -> Location {
    Location::new(50.5871, 8.6750)
}

fn create_participant(id: usize) -> Participant {
    let food_preference = match id % 7 {
        0..=2 => FoodPreference::None,
        3..=4 => FoodPreference::Meat,
        5 => FoodPreference::Veggie,
        _ => FoodPreference::Vegan,
    };
    let has_kitchen = match id % 5 {
        0..=2 => KitchenAvailability::Yes,
        3 => KitchenAvailability::Maybe,
        _ => KitchenAvailability::No,
    };
    let kitchen = (has_kitchen != KitchenAvailability::No).then(|| Kitchen {
        location: Location::new(
            50.55 + (id as f64 * 0.0013) % 0.08,
            8.62 + (id as f64 * 0.0007) % 0.1,
        ),
        story: Some((id % 4) as i32),
    });

    Participant {
        id: format!("p{}", id),
        name: format!("Participant {}", id),
        age: 18 + (id % 40) as u8,
        gender: if id % 2 == 0 { Gender::Female } else { Gender::Male },
        food_preference,
        has_kitchen,
        kitchen,
        partner_id: None,
    }
}

fn create_participants(count: usize) -> Vec<Participant> {
    (0..count).map(create_participant).collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    let a = Location::new(50.5871, 8.6750);
    let b = Location::new(50.8021, 8.7667);

    c.bench_function("haversine_distance", |bencher| {
        bencher.iter(|| haversine_distance(black_box(&a), black_box(&b)));
    });
}

fn bench_arrangements(c: &mut Criterion) {
    let cohort: Vec<PairId> = (0..9).map(PairId).collect();

    c.bench_function("generate_arrangements", |b| {
        b.iter(|| generate_arrangements(black_box(&cohort), black_box(4)));
    });
}

fn bench_pairing(c: &mut Criterion) {
    let engine = PairingEngine::default();
    let mut group = c.benchmark_group("pairing");

    for participant_count in [50, 200, 1000].iter() {
        let participants = create_participants(*participant_count);

        group.bench_with_input(
            BenchmarkId::new("generate_pairs", participant_count),
            participant_count,
            |b, _| {
                b.iter(|| engine.generate_pairs(black_box(&participants), black_box(&party())));
            },
        );
    }

    group.finish();
}

fn bench_grouping(c: &mut Criterion) {
    let engine = GroupFormationEngine::default();
    let mut group = c.benchmark_group("grouping");

    for participant_count in [50, 200, 1000].iter() {
        let pairs = PairingEngine::default()
            .generate_pairs(&create_participants(*participant_count), &party())
            .pairs;

        group.bench_with_input(
            BenchmarkId::new("generate_groups", participant_count),
            participant_count,
            |b, _| {
                b.iter(|| {
                    let mut rng = StdRng::seed_from_u64(42);
                    engine.generate_groups(black_box(pairs.clone()), black_box(&party()), &mut rng)
                });
            },
        );
    }

    group.finish();
}

fn bench_full_plan(c: &mut Criterion) {
    let planner = Planner::default();
    let participants = create_participants(300);

    c.bench_function("plan_300_participants", |b| {
        b.iter(|| planner.plan(black_box(&participants), black_box(&party()), Some(42)));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_arrangements,
    bench_pairing,
    bench_grouping,
    bench_full_plan
);

criterion_main!(benches);
