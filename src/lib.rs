//! Racesplits - checkpoint split analysis for ski races
//!
//! Turns a skier-by-checkpoint table of pass times into comparison series:
//! elapsed time, gap to the leader at each checkpoint, gap to the winner,
//! section pace against the winner, plus synthetic seeding reference skiers.
//!
//! ```
//! use chrono::NaiveTime;
//! use racesplits::matrix::SplitMatrix;
//! use racesplits::transform::Transform;
//!
//! let t = |h, m| NaiveTime::from_hms_opt(h, m, 0);
//! let matrix = SplitMatrix::from_rows(
//!     vec![0.0, 10.0, 20.0],
//!     [
//!         ("A", vec![t(6, 0), t(6, 40), t(7, 20)]),
//!         ("B", vec![t(6, 0), t(6, 50), t(7, 50)]),
//!     ],
//! )
//! .unwrap();
//!
//! let gaps = Transform::Winner.apply(&matrix);
//! assert_eq!(gaps.value("B", 20.0), Some(30.0));
//! ```

pub mod cli;
pub mod csv_output;
pub mod error;
pub mod json_output;
pub mod matrix;
pub mod race;
pub mod seeding;
pub mod series;
pub mod split_time;
pub mod text_output;
pub mod transform;

pub use error::{Result, SplitError};
pub use matrix::SplitMatrix;
pub use series::DerivedSeries;
pub use transform::Transform;
