////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

//! Exercises `stir_tools::run_exporter` directly, without spawning the
//! `stir-exporter` binary as a subprocess.

use std::fs;

const MODEL: &str = "state 3\n\
                      slot 0 node 0\n\
                      slot 1 node 0\n\
                      slot 2 node 0\n\
                      transitions 1\n\
                      transition 0 component 0 src 0 dst 2 guards 0 0 instructions 0\n";

#[test]
fn run_exporter_reads_model_and_dump_and_writes_csv() {
    let dir = std::env::temp_dir().join(format!(
        "stir-tools-exporter-test-{:?}-{}",
        std::thread::current().id(),
        std::process::id()
    ));
    fs::create_dir_all(&dir).unwrap();
    let stir_path = dir.join("model.stir");
    let bin_path = dir.join("states.bin");

    fs::write(&stir_path, MODEL).unwrap();

    let mut dump = Vec::new();
    for value in [0i32, 1, 2] {
        dump.extend_from_slice(&value.to_ne_bytes());
    }
    fs::write(&bin_path, &dump).unwrap();

    let mut out = Vec::new();
    stir_tools::run_exporter(
        stir_path.to_str().unwrap(),
        bin_path.to_str().unwrap(),
        &mut out,
    )
    .expect("exporter run should succeed");

    let csv = String::from_utf8(out).unwrap();
    assert!(csv.starts_with("slot1,value1,slot2,value2\n"));
    assert!(csv.contains("0,0,2,2"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn run_exporter_reports_a_resource_error_for_a_missing_model_file() {
    let err = stir_tools::run_exporter("/nonexistent/stir/model/path.stir", "/nonexistent/dump.bin", Vec::new())
        .expect_err("missing model file should fail");

    assert!(matches!(err, stir_core::StirError::Resource { .. }));
}
