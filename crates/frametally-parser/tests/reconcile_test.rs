//! End-to-end reconciliation tests against realistic work orders and logs.
//!
//! These pin the segment-count asymmetry between station log keys (two
//! segments dropped, one for Flame) and canonical location suffixes (three
//! segments dropped). Changing either count silently breaks matching for
//! existing facility data.

use frametally_common::Machine;
use frametally_parser::{
    compress, dialect_for, merge, parse_locations, parse_log, reconcile, DEFAULT_STEP,
};

const XYTECH: &str = "Xytech Workorder 1109

Producer: Joan Jett
Operator: John Doe
Job: Dune 2

Location:
/hpsans13/production/Dune2/reel1/partA/1920x1080
/hpsans12/production/Dune2/reel1/VFX/Hydraulx
/hpsans13/production/Dune2/reel1/VFX/Framestore
/hpsans14/production/Dune2/reel1/VFX/AnimalLogic
/hpsans13/production/Dune2/reel1/partB/1920x1080

Notes:
Please clean up all frames listed by the stations.
";

const BASELIGHT: &str = "/baselightfilesystem1/Dune2/reel1/partA/1920x1080 2 3 4 31 32 33 67 68 <err> 69 70
/baselightfilesystem1/Dune2/reel1/VFX/Hydraulx 1260 1261 1262 1267
/baselightfilesystem1/Dune2/reel1/VFX/Framestore 5010 5011 5012 <null>
/baselightfilesystem1/Dune2/reel1/partB/1920x1080 100 101 102 103 104
/baselightfilesystem1/Dune2/reel1/partA/1920x1080 71 72
/baselightfilesystem1/Dune2/reel2/partA/1920x1080 1 2 3
";

const FLAME: &str = "/net/flame-archive Dune2/reel1/partB/1920x1080 6188 6189 6190 6191
/net/flame-archive Dune2/reel1/VFX/AnimalLogic 12 13 14 20
/net/flame-archive Dune2/reel1/partA/1920x1080 8 9
";

fn rows(machine: Machine, log: &str) -> Vec<String> {
    reconcile(XYTECH, machine, log)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn baselight_log_reconciles_against_work_order() {
    assert_eq!(
        rows(Machine::Baselight, BASELIGHT),
        [
            "hpsans13/Dune2/reel1/partA/1920x1080,2-4",
            "hpsans13/Dune2/reel1/partA/1920x1080,31-33",
            "hpsans13/Dune2/reel1/partA/1920x1080,67-72",
            "hpsans13/Dune2/reel1/partB/1920x1080,100-104",
            "hpsans12/Dune2/reel1/VFX/Hydraulx,1260-1262",
            "hpsans12/Dune2/reel1/VFX/Hydraulx,1267",
            "hpsans13/Dune2/reel1/VFX/Framestore,5010-5012",
        ]
    );
}

#[test]
fn flame_log_reconciles_against_work_order() {
    assert_eq!(
        rows(Machine::Flame, FLAME),
        [
            "net/flame-archive hpsans13/Dune2/reel1/partA/1920x1080,8-9",
            "net/flame-archive hpsans14/Dune2/reel1/VFX/AnimalLogic,12-14",
            "net/flame-archive hpsans14/Dune2/reel1/VFX/AnimalLogic,20",
            "net/flame-archive hpsans13/Dune2/reel1/partB/1920x1080,6188-6191",
        ]
    );
}

#[test]
fn single_location_scenario() {
    let canonical = "Location:\n  /net/showA/seq01/shot010/plate\n";
    let log = "/mnt/seq01/shot010/plate 100 101 102 105";

    let rows: Vec<String> = reconcile(canonical, Machine::Baselight, log)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(
        rows,
        [
            "net/seq01/shot010/plate,100-102",
            "net/seq01/shot010/plate,105",
        ]
    );
}

#[test]
fn equal_depth_paths_do_not_match() {
    // A station path as deep as the canonical location keeps one segment
    // too many after the two-segment strip, so it never matches. This is
    // the behavior existing facility data depends on.
    let canonical = "Location:\n  /net/showA/seq01/shot010/plate\n";
    let log = "/mnt/baselight/seq01/shot010/plate 100 101 102 105";

    assert!(reconcile(canonical, Machine::Baselight, log)
        .unwrap()
        .is_empty());

    let parsed = parse_log(Machine::Baselight, log);
    assert!(parsed.contains_key("baselight/seq01/shot010/plate"));
}

#[test]
fn empty_log_produces_no_rows_for_any_machine() {
    let canonical = parse_locations(XYTECH).unwrap();
    for machine in Machine::ALL {
        let log = parse_log(machine, "");
        assert!(log.is_empty());
        assert!(merge(&canonical, &log, dialect_for(machine)).is_empty());
    }
}

#[test]
fn dialects_are_not_interchangeable() {
    // A Flame log read as Baselight keys on the storage label, not the path.
    let rows = rows(Machine::Baselight, FLAME);
    assert!(rows.is_empty());
}

#[test]
fn compress_roundtrip_over_many_sequences() {
    let sequences: Vec<Vec<u64>> = vec![
        vec![],
        vec![0],
        (0..50).collect(),
        (0..50).step_by(2).collect(),
        vec![1, 2, 3, 10, 11, 40, 41, 42, 43, 1000],
        (0..200).filter(|n| n % 7 != 0).collect(),
    ];

    for sequence in sequences {
        let expanded: Vec<u64> = compress(&sequence, DEFAULT_STEP)
            .iter()
            .flat_map(|range| range.expand(DEFAULT_STEP))
            .collect();
        assert_eq!(expanded, sequence);
    }
}
