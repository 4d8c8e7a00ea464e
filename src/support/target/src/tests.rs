use super::*;

#[test]
fn test_presets_by_name() {
    assert_eq!("lp64".parse::<MachineProfile>(), Ok(MachineProfile::LP64));
    assert_eq!("ILP32".parse::<MachineProfile>(), Ok(MachineProfile::ILP32));
    assert_eq!("i686".parse::<MachineProfile>(), Ok(MachineProfile::I386_SYSV));
    assert_eq!(
        "pdp11".parse::<MachineProfile>(),
        Err(UnknownProfile("pdp11".into()))
    );
}

#[test]
fn test_long_size_follows_data_model() {
    assert_eq!(MachineProfile::LP64.long_size(), ByteUnits::of(8));
    assert_eq!(MachineProfile::LLP64.long_size(), ByteUnits::of(4));
    assert_eq!(MachineProfile::ILP32.long_size(), ByteUnits::of(4));
}

#[test]
fn test_custom_profile_builders() {
    let profile = MachineProfile::custom(ByteUnits::of(4), ByteUnits::of(4))
        .with_cache_line_size(ByteUnits::of(32))
        .with_bitfield_direction(BitfieldDirection::HighToLow)
        .with_double_alignment(ByteUnits::of(4));

    assert_eq!(profile.data_model, DataModel::Ilp32);
    assert_eq!(profile.cache_line_size, ByteUnits::of(32));
    assert!(profile.bitfield.direction.is_high_to_low());
    assert!(!profile.bitfield.avoid_byte_straddle);
    assert_eq!(profile.double_alignment_override, Some(ByteUnits::of(4)));
}

#[test]
fn test_display() {
    assert_eq!(
        MachineProfile::I386_SYSV.to_string(),
        "i386 (ILP32, word 4, pointer 4, cache line 64, bitfields low-to-high), double aligned to 4"
    );
}
