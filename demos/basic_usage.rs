// demos/basic_usage.rs
//
// Aggregates two in-memory prefecture units and prints both collections as
// newline-delimited GeoJSON, followed by the run statistics.
//
//   cargo run --example basic_usage

use adminbound_core::enrich::BasicStatsTable;
use adminbound_core::raw::UnitRaw;
use adminbound_core::{aggregate, write_collection, Enricher, GeometryFragment, Result};
use std::collections::HashMap;
use std::io::Write;

fn square(x: f64, y: f64) -> Vec<Vec<Vec<f64>>> {
    vec![vec![
        vec![x, y],
        vec![x + 0.5, y],
        vec![x + 0.5, y + 0.5],
        vec![x, y + 0.5],
        vec![x, y],
    ]]
}

fn fragment(code: &str, name: &str, x: f64, y: f64) -> GeometryFragment {
    GeometryFragment::new(code, Some(square(x, y)))
        .with_property("NAME", name)
        .with_property("FillColor", "#f4e3c1")
}

/// Stands in for the converted files a real run would read from disk.
fn boundaries(unit: &UnitRaw) -> Result<Vec<GeometryFragment>> {
    Ok(match unit.code.as_str() {
        "420800" => vec![
            fragment("420800", "荆门市", 112.0, 30.5),
            fragment("420802", "东宝区", 112.1, 31.0),
            fragment("420802", "东宝区", 112.7, 31.0),
            fragment("420881", "钟祥市", 112.5, 31.2),
            GeometryFragment::new("fanwei", None),
        ],
        "110000" => vec![
            fragment("110000", "北京市", 116.0, 39.5),
            fragment("110101", "东城区", 116.4, 39.9),
            // Belongs to another province; discarded.
            fragment("120101", "和平区", 117.2, 39.1),
        ],
        _ => Vec::new(),
    })
}

fn main() -> Result<()> {
    let units = vec![
        UnitRaw {
            diji: "荆门市".into(),
            code: "420800".into(),
            ..Default::default()
        },
        UnitRaw {
            diji: "北京市".into(),
            code: "110000".into(),
            ..Default::default()
        },
    ];

    let stats: HashMap<String, Vec<Option<String>>> = HashMap::from([(
        "420802".to_string(),
        ["东宝区", "龙泉街道", "410000", "1651", "0724", "448000", "市辖区"]
            .map(|cell| Some(cell.to_string()))
            .to_vec(),
    )]);
    let enricher = Enricher::new().with_source(BasicStatsTable::from_raw(stats));

    let out = aggregate(&units, &boundaries, &enricher, 1)?;

    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    writeln!(lock, "# county")?;
    write_collection(&out.county, &mut lock)?;
    writeln!(lock, "# city")?;
    write_collection(&out.city, &mut lock)?;
    writeln!(lock, "{}", serde_json::to_string_pretty(&out.stats)?)?;
    Ok(())
}
