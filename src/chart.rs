//! SVG rendering of a solution: customers as dots, routes as arrows.

use log::debug;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use crate::problem::{Problem, DEPOT};
use crate::solution::Solution;

const CHART_SIZE: (u32, u32) = (1600, 800);

/// Draw all locations and the route of every vehicle into an SVG file.
pub fn render_chart<P: AsRef<Path>>(
    solution: &Solution,
    problem: &Problem,
    path: P,
) -> Result<(), Box<dyn Error>> {
    let path = path.as_ref();
    let (x_range, y_range) = bounds(problem);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Total distance {:.2} ({})", solution.distance, solution.status),
            ("sans-serif", 24),
        )
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    chart.configure_mesh().disable_mesh().draw()?;

    let customers = problem.nodes().iter().filter(|node| !node.is_depot());
    chart.draw_series(
        customers
            .clone()
            .map(|node| Circle::new((node.x, node.y), 4, BLUE.filled())),
    )?;
    chart.draw_series(customers.map(|node| {
        Text::new(
            format!("{} d={}", node.id, node.demand),
            (node.x, node.y),
            ("sans-serif", 11).into_font().color(&BLUE),
        )
    }))?;

    // Head size in data units, relative to the plotted area
    let head = 0.015 * (x_range.end - x_range.start).max(y_range.end - y_range.start);

    for route in solution.routes.iter().filter(|route| !route.is_empty()) {
        let color = Palette99::pick(route.vehicle).to_rgba();
        let path = route.path();

        for (leg, pair) in path.windows(2).enumerate() {
            let from = problem.coordinate(pair[0]);
            let to = problem.coordinate(pair[1]);

            chart.draw_series(std::iter::once(PathElement::new(
                vec![from, to],
                color.stroke_width(2),
            )))?;
            if let Some(tip) = arrow_head(from, to, head) {
                chart.draw_series(std::iter::once(Polygon::new(tip, color.filled())))?;
            }

            if leg == 1 {
                let middle = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
                chart.draw_series(std::iter::once(Text::new(
                    format!("V{}", route.vehicle),
                    middle,
                    ("sans-serif", 14).into_font().color(&color),
                )))?;
            }
        }
    }

    let (depot_x, depot_y) = problem.coordinate(DEPOT);
    chart.draw_series(std::iter::once(Rectangle::new(
        [
            (depot_x - head, depot_y - head),
            (depot_x + head, depot_y + head),
        ],
        RED.filled(),
    )))?;
    chart.draw_series(std::iter::once(Text::new(
        "depot",
        (depot_x, depot_y - 2.0 * head),
        ("sans-serif", 12).into_font().color(&RED),
    )))?;

    root.present()?;
    debug!("Chart written to {}", path.display());
    Ok(())
}

/// Padded plotting ranges covering every location.
fn bounds(problem: &Problem) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;

    for node in problem.nodes() {
        min_x = min_x.min(node.x);
        min_y = min_y.min(node.y);
        max_x = max_x.max(node.x);
        max_y = max_y.max(node.y);
    }

    let pad_x = ((max_x - min_x) * 0.05).max(1.0);
    let pad_y = ((max_y - min_y) * 0.05).max(1.0);

    (
        (min_x - pad_x)..(max_x + pad_x),
        (min_y - pad_y)..(max_y + pad_y),
    )
}

/// Triangle pointing at `to` along the leg from `from`, or `None` for a zero-length leg.
fn arrow_head(from: (f64, f64), to: (f64, f64), size: f64) -> Option<Vec<(f64, f64)>> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let length = (dx * dx + dy * dy).sqrt();
    if length <= f64::EPSILON {
        return None;
    }

    let (ux, uy) = (dx / length, dy / length);
    let base = (to.0 - ux * size * 2.0, to.1 - uy * size * 2.0);

    Some(vec![
        to,
        (base.0 - uy * size, base.1 + ux * size),
        (base.0 + uy * size, base.1 - ux * size),
    ])
}
