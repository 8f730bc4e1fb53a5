//! The `neuroeval curves` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use neuroeval_core::chart::membership_curves;
use neuroeval_core::defuzzify::Resolution;
use neuroeval_core::registry;

pub fn execute(variable_name: String, step: f64) -> Result<()> {
    let variable = registry::variable(&variable_name)?;
    let resolution = Resolution::new(step)?;
    let curves = membership_curves(variable, resolution);

    let mut header = vec!["x".to_string()];
    header.extend(curves.iter().map(|c| c.term.clone()));

    let mut table = Table::new();
    table.set_header(header);

    let samples = curves.first().map_or(0, |c| c.points.len());
    for i in 0..samples {
        let mut row = vec![Cell::new(curves[0].points[i].x)];
        row.extend(
            curves
                .iter()
                .map(|c| Cell::new(format!("{:.3}", c.points[i].y))),
        );
        table.add_row(row);
    }

    println!("{} membership functions\n{table}", variable.name);
    Ok(())
}
