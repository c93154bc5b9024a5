// Vicinity Testdata - Dataset generation example
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Generate a small synthetic capture and write it as `rssi_data.csv`,
//! ready for `vicinity-report`.

use std::path::Path;
use vicinity::Calibration;
use vicinity_testdata::{generate_records, write_csv, DeviceProfile, GeneratorConfig};

fn main() {
    let config = GeneratorConfig::new()
        .with_num_samples(120)
        .with_sample_interval_ms(1_000)
        .with_seed(42);

    let profiles = vec![
        DeviceProfile::new("AA:00:00:00:00:01", 1.2)
            .with_display_name("Desk Speaker")
            .with_channel(6)
            .with_noise(1.5),
        DeviceProfile::new("AA:00:00:00:00:02", 4.5)
            .with_display_name("Kitchen AP")
            .with_channel(11)
            .with_noise(2.5),
        DeviceProfile::new("AA:00:00:00:00:03", 12.0)
            .with_display_name("")
            .with_channel(1)
            .with_noise(4.0),
    ];

    let records = generate_records(&config, &profiles, &Calibration::default());
    let path = Path::new("rssi_data.csv");
    write_csv(path, &records).expect("could not write dataset");

    println!("wrote {} records to {}", records.len(), path.display());
}
