#![no_main]

use libfuzzer_sys::fuzz_target;
use racesplits::matrix::SplitMatrix;
use racesplits::transform::Transform;

fuzz_target!(|data: &[u8]| {
    // Arbitrary sheets must load or fail cleanly, and any loaded matrix
    // must survive every transform
    if let Ok(matrix) = SplitMatrix::from_csv_reader(data, "skier") {
        for transform in Transform::ALL {
            let _ = transform.apply(&matrix);
        }
    }
});
