use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::{compute_available_slots, BookingStatus, ClockTime, DaySchedule, ExistingBooking};
use std::hint::black_box;

fn busy_day() -> (DaySchedule, Vec<ExistingBooking>) {
    let day = DaySchedule::open(ClockTime::from_hm(7, 0).unwrap(), ClockTime::from_hm(22, 0).unwrap())
        .with_break(ClockTime::from_hm(12, 0).unwrap(), ClockTime::from_hm(13, 0).unwrap());
    let statuses = [
        BookingStatus::Confirmed,
        BookingStatus::Pending,
        BookingStatus::Cancelled,
    ];
    let bookings = (0..20)
        .map(|i| {
            let start = ClockTime::from_minutes(420 + i * 45).unwrap();
            ExistingBooking::new(start, 30, statuses[(i % 3) as usize])
        })
        .collect();
    (day, bookings)
}

fn bench_compute(c: &mut Criterion) {
    let (day, bookings) = busy_day();
    let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let now = date.and_hms_opt(10, 5, 0).unwrap();

    c.bench_function("compute_available_slots/busy_day", |b| {
        b.iter(|| {
            compute_available_slots(
                black_box(&day),
                black_box(&bookings),
                black_box(45),
                black_box(date),
                black_box(now),
            )
        })
    });

    c.bench_function("compute_available_slots/empty_day", |b| {
        b.iter(|| compute_available_slots(black_box(&day), &[], black_box(60), date, now))
    });
}

criterion_group!(benches, bench_compute);
criterion_main!(benches);
