use super::*;
use target::MachineProfile;

#[test]
fn test_lp64_primitives() {
    let catalog = TypeCatalog::new(MachineProfile::LP64).unwrap();

    for (name, size) in [
        ("char", 1),
        ("short", 2),
        ("int", 4),
        ("long", 8),
        ("void*", 8),
        ("double", 8),
        ("long double", 16),
    ] {
        let layout = catalog.describe(name).unwrap();
        assert_eq!(layout.width, ByteUnits::of(size), "size of {name}");
        assert_eq!(layout.alignment, ByteUnits::of(size), "alignment of {name}");
    }
}

#[test]
fn test_same_name_resolves_per_profile() {
    let lp64 = TypeCatalog::new(MachineProfile::LP64).unwrap();
    let llp64 = TypeCatalog::new(MachineProfile::LLP64).unwrap();
    let i386 = TypeCatalog::new(MachineProfile::I386_SYSV).unwrap();

    assert_eq!(lp64.describe("long").unwrap().width, ByteUnits::of(8));
    assert_eq!(llp64.describe("long").unwrap().width, ByteUnits::of(4));
    assert_eq!(i386.describe("void*").unwrap().width, ByteUnits::of(4));

    let double = i386.describe("double").unwrap();
    assert_eq!(double.width, ByteUnits::of(8));
    assert_eq!(double.alignment, ByteUnits::of(4));
}

#[test]
fn test_unknown_type() {
    let catalog = TypeCatalog::new(MachineProfile::LP64).unwrap();
    let error = catalog.describe("widget").unwrap_err();
    assert_eq!(error.kind, CatalogErrorKind::UnknownType);
    assert_eq!(error.to_string(), "Unknown type 'widget'");
}

#[test]
fn test_register_rejects_bad_alignment() {
    let mut catalog = TypeCatalog::empty(MachineProfile::LP64);

    let error = catalog
        .register(
            "odd",
            TypeLayout::opaque(ByteUnits::of(6), ByteUnits::of(3)),
        )
        .unwrap_err();
    assert_eq!(
        error.kind,
        CatalogErrorKind::InvalidAlignment {
            alignment: ByteUnits::of(3)
        }
    );

    catalog
        .register(
            "vec4",
            TypeLayout::opaque(ByteUnits::of(16), ByteUnits::of(16)),
        )
        .unwrap();
    assert_eq!(
        catalog.describe("vec4").unwrap().alignment,
        ByteUnits::of(16)
    );
}

#[test]
fn test_array_of() {
    let catalog = TypeCatalog::new(MachineProfile::LP64).unwrap();

    let array = catalog.array_of("int", 3).unwrap();
    assert_eq!(array.width, ByteUnits::of(12));
    assert_eq!(array.alignment, ByteUnits::of(4));
    assert!(array.class.is_array());

    let empty = catalog.array_of("long", 0).unwrap();
    assert_eq!(empty.width, ByteUnits::ZERO);
    assert_eq!(empty.alignment, ByteUnits::of(8));
}

#[test]
fn test_array_size_overflow() {
    let catalog = TypeCatalog::new(MachineProfile::LP64).unwrap();

    let error = catalog.array_of("int", u64::MAX / 2).unwrap_err();
    assert_eq!(
        error.kind,
        CatalogErrorKind::SizeOverflow {
            length: u64::MAX / 2
        }
    );
    assert_eq!(error.type_name, "int");
}

#[test]
fn test_profile_with_invalid_alignment() {
    let profile = MachineProfile::custom(ByteUnits::of(6), ByteUnits::of(6));

    let error = TypeCatalog::new(profile).unwrap_err();
    assert_eq!(
        error.kind,
        CatalogErrorKind::InvalidAlignment {
            alignment: ByteUnits::of(6)
        }
    );
    assert_eq!(error.type_name, "void*");

    let zero_enum = MachineProfile::LP64.with_enum_size(ByteUnits::ZERO);
    assert_eq!(
        TypeCatalog::new(zero_enum).unwrap_err().type_name,
        "enum"
    );
}
