//! Text rendering of editor events

use std::fmt::Write;

use cutplane_lib::{
    color,
    common::PlaneIndicator,
    editor::PlaneUniforms,
    histogram::Histogram,
    transfer::{IsoLayers, UNUSED},
};

pub fn format_plane(uniforms: &PlaneUniforms, indicator: Option<&PlaneIndicator>) -> String {
    let p = uniforms.plane;
    let mut out = format!(
        "plane [{:.4}, {:.4}, {:.4}, {:.4}] color {} render_above {}",
        p.x,
        p.y,
        p.z,
        p.w,
        color::to_hex(&uniforms.color),
        uniforms.render_above
    );
    if let Some(ind) = indicator {
        let c = ind.center;
        let _ = write!(
            out,
            "\nindicator center [{:.4}, {:.4}, {:.4}] side {:.2} {}",
            c.x,
            c.y,
            c.z,
            ind.side,
            if ind.visible { "shown" } else { "hidden" }
        );
    }
    out
}

/// Horizontal bars, neighbouring bins are summed to fit into `rows`
pub fn text_histogram(hist: &Histogram, rows: usize, width: usize) -> String {
    let counts = hist.counts();
    let rows = rows.clamp(1, counts.len());
    let per_row = (counts.len() + rows - 1) / rows;

    let merged: Vec<(usize, usize)> = counts
        .chunks(per_row)
        .enumerate()
        .map(|(i, chunk)| (i * per_row, chunk.iter().sum()))
        .collect();
    let max = merged.iter().map(|(_, c)| *c).max().unwrap_or(0);

    let mut out = format!(
        "histogram {} visible, {} skipped",
        hist.total(),
        hist.skipped()
    );
    for (first_bin, count) in merged {
        let bar = if max == 0 { 0 } else { count * width / max };
        let low = hist.bin_range(first_bin).start;
        let _ = write!(out, "\n{:>8.3} | {:<width$} {}", low, "#".repeat(bar), count);
    }
    out
}

pub fn format_layers(layers: &IsoLayers) -> String {
    let mut out = format!("{} saved layers", layers.len());
    let iso = layers.iso_values();
    let opacity = layers.opacities();
    let colors = layers.surface_colors();
    for i in 0..iso.len() {
        if iso[i] == UNUSED {
            let _ = write!(out, "\n  [{i}] unused");
        } else {
            let _ = write!(
                out,
                "\n  [{i}] iso {:.3} opacity {:.3} {}",
                iso[i],
                opacity[i],
                color::to_hex(&colors[i])
            );
        }
    }
    out
}

#[cfg(test)]
mod test {

    use cutplane_lib::common::ValueRange;
    use nalgebra::vector;

    use super::*;

    #[test]
    fn plane_line() {
        let uniforms = PlaneUniforms {
            plane: vector![0.0, 0.0, 1.0, -0.25],
            color: color::new(1.0, 0.0, 0.0),
            render_above: 1.0,
        };
        assert_eq!(
            format_plane(&uniforms, None),
            "plane [0.0000, 0.0000, 1.0000, -0.2500] color #ff0000 render_above 1"
        );
    }

    #[test]
    fn bars_scale_to_width() {
        let hist = Histogram::from_samples(
            ValueRange::unit(),
            4,
            [0.1, 0.1, 0.1, 0.1, 0.6, 0.6, 2.0],
        );
        let text = text_histogram(&hist, 4, 8);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "histogram 6 visible, 1 skipped");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("######## 4"));
        assert_eq!(lines[3].matches('#').count(), 4);
        assert!(lines[3].ends_with(" 2"));
    }

    #[test]
    fn bins_are_merged() {
        let hist = Histogram::from_samples(ValueRange::unit(), 100, [0.0, 0.99]);
        let text = text_histogram(&hist, 10, 10);
        assert_eq!(text.lines().count(), 11);
    }

    #[test]
    fn layer_listing() {
        let mut layers = IsoLayers::new();
        layers.move_cursor(0.2, 0.5);
        layers.save_layer(color::new(0.0, 1.0, 0.0)).unwrap();

        let text = format_layers(&layers);
        assert!(text.starts_with("1 saved layers"));
        assert!(text.contains("[0] iso 0.200 opacity 0.500 #00ff00"));
        assert!(text.contains("[1] iso 0.500 opacity 1.000 #ffffff"));
        assert!(text.contains("[2] unused"));
    }
}
