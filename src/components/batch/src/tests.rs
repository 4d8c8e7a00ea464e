use super::*;
use aggregate::{Member, MemberType};
use build_layout::{DisjointAssertion, LayoutErrorKind};
use data_units::ByteUnits;
use diagnostics::{DiagnosticFlags, Location};
use repack::RepackConstraints;
use std::num::NonZero;
use target::MachineProfile;

fn pointer(name: &str) -> Member {
    Member::pointer(name, MemberType::scalar("char"))
}

fn records() -> Records {
    let tagged_int = Aggregate::structure("tagged_int")
        .member(Member::scalar("tag", "int"))
        .member(Member::scalar("value", "int"));
    let tagged_ptr = Aggregate::structure("tagged_ptr")
        .member(Member::scalar("tag", "int"))
        .member(pointer("value"));

    [tagged_int, tagged_ptr].into_iter().collect()
}

fn inputs() -> Vec<Aggregate> {
    vec![
        Aggregate::structure("loose")
            .member(Member::scalar("c", "char"))
            .member(pointer("p"))
            .member(Member::scalar("x", "short")),
        Aggregate::structure("broken").member(Member::scalar("w", "widget")),
        Aggregate::union("value")
            .member(Member::record("i", "tagged_int"))
            .member(Member::record("p", "tagged_ptr")),
        Aggregate::structure("flags")
            .member(Member::bitfield("flip", "int", 1))
            .member(Member::bitfield("nybble", "int", 4))
            .member(Member::bitfield("septet", "int", 7)),
        Aggregate::structure("too_wide").member(Member::bitfield("b", "char", 9)),
    ]
}

fn run(options: &BatchOptions) -> Vec<BatchEntry> {
    let catalog = TypeCatalog::new(MachineProfile::LP64).unwrap();
    let records = records();
    let diagnostics = Diagnostics::default();
    run_batch(&inputs(), &catalog, &records, &diagnostics, options)
}

#[test]
fn test_failures_stay_local() {
    let entries = run(&BatchOptions::sequential());

    let names: Vec<_> = entries.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["loose", "broken", "value", "flags", "too_wide"]);

    let ok: Vec<_> = entries.iter().map(BatchEntry::is_ok).collect();
    assert_eq!(ok, [true, false, true, true, false]);

    let broken = entries[1].outcome.as_ref().unwrap_err();
    assert_eq!(
        broken.kind,
        LayoutErrorKind::UnknownType {
            name: "widget".into()
        }
    );
    assert_eq!(broken.location, Location::member("broken", "w"));

    let too_wide = entries[4].outcome.as_ref().unwrap_err();
    assert!(too_wide.kind.is_invalid_bitfield_width());

    let loose = entries[0].outcome.as_ref().unwrap();
    assert_eq!(loose.layout.size, ByteUnits::of(24));
    assert!(loose.repacked.is_none());
}

#[test]
fn test_parallel_matches_sequential() {
    let sequential = run(&BatchOptions::sequential());

    for threads in [2, 3, 8] {
        let options = BatchOptions::default().with_parallelism(NonZero::new(threads).unwrap());
        assert_eq!(run(&options), sequential);
    }
}

#[test]
fn test_repacks_when_requested() {
    let options = BatchOptions::sequential().with_repack(RepackConstraints::default());
    let entries = run(&options);

    let loose = entries[0].outcome.as_ref().unwrap();
    let repacked = loose.repacked.as_ref().unwrap();
    assert_eq!(repacked.savings, ByteUnits::of(8));
    assert_eq!(
        repacked.aggregate.member_names().collect::<Vec<_>>(),
        ["p", "x", "c"]
    );

    let flags = entries[3].outcome.as_ref().unwrap();
    assert_eq!(flags.repacked.as_ref().unwrap().savings, ByteUnits::ZERO);

    let text = loose.to_string();
    assert!(text.starts_with("struct loose: size 24, alignment 8"));
    assert!(text.contains("\nrepacked struct loose: p, x, c\n"));
}

#[test]
fn test_union_assertions() {
    let passing = BatchOptions::sequential()
        .assert_disjoint("value", DisjointAssertion::new("i.value", "p.tag"));
    assert!(run(&passing)[2].is_ok());

    let failing = BatchOptions::sequential()
        .assert_disjoint("value", DisjointAssertion::new("i.value", "p.tag"))
        .assert_disjoint("value", DisjointAssertion::new("i.tag", "p.tag"));
    let entries = run(&failing);

    let error = entries[2].outcome.as_ref().unwrap_err();
    assert!(error.kind.is_incompatible_union_layout());
    assert!(entries[0].is_ok());
}

#[test]
fn test_warnings_are_collected_from_workers() {
    let catalog = TypeCatalog::new(MachineProfile::LP64).unwrap();
    let records = records();
    let diagnostics = Diagnostics::new(DiagnosticFlags::all_collected());

    let aggregates = [
        Aggregate::structure("a")
            .member(Member::scalar("c", "char"))
            .member(Member::scalar("i", "int")),
        Aggregate::structure("b")
            .member(Member::scalar("s", "short"))
            .member(Member::scalar("c", "char")),
    ];

    let options = BatchOptions::default().with_parallelism(NonZero::new(2).unwrap());
    let entries = run_batch(&aggregates, &catalog, &records, &diagnostics, &options);

    assert!(entries.iter().all(BatchEntry::is_ok));
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn test_oversized_aggregate_stays_local() {
    let catalog = TypeCatalog::new(MachineProfile::LP64).unwrap();
    let records = records();
    let diagnostics = Diagnostics::default();

    let mut aggregates = inputs();
    aggregates.insert(
        1,
        Aggregate::structure("huge")
            .member(Member::scalar("c", "char"))
            .member(Member::array("a", MemberType::scalar("int"), u64::MAX / 2)),
    );

    for options in [
        BatchOptions::sequential(),
        BatchOptions::default()
            .with_parallelism(NonZero::new(3).unwrap())
            .with_repack(RepackConstraints::default()),
    ] {
        let entries = run_batch(&aggregates, &catalog, &records, &diagnostics, &options);

        let ok: Vec<_> = entries.iter().map(BatchEntry::is_ok).collect();
        assert_eq!(ok, [true, false, false, true, true, false]);

        let huge = entries[1].outcome.as_ref().unwrap_err();
        assert!(huge.kind.is_size_overflow());
        assert_eq!(huge.location, Location::member("huge", "a"));
    }
}

#[test]
fn test_empty_batch() {
    let catalog = TypeCatalog::new(MachineProfile::ILP32).unwrap();
    let records = Records::new();
    let diagnostics = Diagnostics::default();

    let entries = run_batch(
        &[],
        &catalog,
        &records,
        &diagnostics,
        &BatchOptions::default(),
    );
    assert!(entries.is_empty());
}
