//! The sample organisation used by the command line driver.

use crate::domain::chart::OrgChart;
use crate::domain::error::DomainResult;

pub const DEFAULT_CEO: &str = "CEO";

/// Builds:
///
/// ```text
/// CEO
/// ├── VP_Sales
/// │   ├── Rep1
/// │   └── Rep2
/// └── VP_Eng
///     └── Dev1
/// ```
pub fn sample_chart(ceo: &str) -> DomainResult<OrgChart> {
    let mut chart = OrgChart::new(ceo)?;
    let root = chart.root_id();

    let sales = chart.add_child(root, "VP_Sales")?;
    chart.add_child(sales, "Rep1")?;
    chart.add_child(sales, "Rep2")?;

    let eng = chart.add_child(root, "VP_Eng")?;
    chart.add_child(eng, "Dev1")?;

    Ok(chart)
}
