//! Organisation chart: a tree of people rooted at a CEO.
//!
//! ```
//! use orgchart::domain::OrgChart;
//!
//! let mut chart = OrgChart::new("CEO").unwrap();
//! let root = chart.root_id();
//! let vp = chart.add_child(root, "VP_Eng").unwrap();
//! chart.add_child(vp, "Dev1").unwrap();
//!
//! assert_eq!(chart.size(), 3);
//! assert_eq!(chart.height(), 3);
//! assert!(chart.contains("Dev1"));
//! assert_eq!(chart.to_string(), "- CEO\n - VP_Eng\n  - Dev1\n");
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
