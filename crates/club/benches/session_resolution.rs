use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use bookclub_club::{Club, get_nth_session};
use bookclub_core::{CommunityKey, ParticipantId};
use chrono::{NaiveDate, TimeZone, Utc};

fn club_with_queue(len: i64) -> Club {
    let anchor = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut club = Club::new(CommunityKey::new(1), anchor);
    let mut queue = Vec::new();
    for n in 0..len {
        let id = ParticipantId::new(n);
        club.add_host(id, format!("host-{n}")).unwrap();
        queue.push(id);
    }
    club.set_queue(queue).unwrap();
    club
}

fn bench_get_nth_session(c: &mut Criterion) {
    let club = club_with_queue(12);
    let now = NaiveDate::from_ymd_opt(2025, 6, 17).unwrap();

    let mut group = c.benchmark_group("get_nth_session");
    for n in [1u32, 12, 120] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| get_nth_session(black_box(n), &club, black_box(now)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_get_nth_session);
criterion_main!(benches);
