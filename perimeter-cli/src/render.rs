//! SVG rendering for diagrams and worksheet pages.

use std::fmt::{self, Write};

use perimeter_core::{
    generator::Level,
    labels::{LabelState, PlacedLabel},
    layout::{Band, Cell, Page},
    projector::Diagram,
    r2::R2,
};

/// SVG rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Outline stroke width, in font sizes
    pub stroke_width: f64,
    /// Leader line stroke width, in font sizes
    pub leader_width: f64,
    /// Tick mark length, in font sizes
    pub tick_length: f64,
    /// Space between parallel tick marks, in font sizes
    pub tick_spacing: f64,
    pub outline_color: &'static str,
    pub fill_color: &'static str,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            stroke_width: 0.15,
            leader_width: 0.06,
            tick_length: 0.7,
            tick_spacing: 0.3,
            outline_color: "#1f2937",
            fill_color: "#eef2ff",
        }
    }
}

/// Pill fill and text colour per label state
fn pill_colors(state: LabelState) -> (&'static str, &'static str) {
    match state {
        LabelState::Given => ("#f3f4f6", "#111827"),
        LabelState::Converted => ("#fef3c7", "#92400e"),
        LabelState::Hidden => ("#fee2e2", "#b91c1c"),
        LabelState::Revealed => ("#dcfce7", "#166534"),
    }
}

fn band_color(level: Level) -> &'static str {
    match level {
        Level::One => "#dbeafe",
        Level::Two => "#fef9c3",
        Level::Three => "#fce7f3",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn write_ticks(svg: &mut String, diagram: &Diagram, config: &RenderConfig) -> fmt::Result {
    let font = diagram.canvas.font_size;
    let n = diagram.vertices.len();
    for (i, ticks) in diagram.ticks.iter().enumerate() {
        let Some(count) = *ticks else { continue };
        let (a, b) = (diagram.vertices[i], diagram.vertices[(i + 1) % n]);
        let along = (b - a).normalize();
        let across = along.perp() * (config.tick_length * font / 2.);
        let mid = a.midpoint(&b);
        for k in 0..count {
            let shift = (k as f64 - (count as f64 - 1.) / 2.) * config.tick_spacing * font;
            let c = mid + along * shift;
            let (p, q) = (c - across, c + across);
            writeln!(
                svg,
                r#"  <line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="{}" stroke-width="{:.3}"/>"#,
                p.x, p.y, q.x, q.y, config.outline_color, config.stroke_width * font
            )?;
        }
    }
    Ok(())
}

fn write_label(svg: &mut String, label: &PlacedLabel, font: f64, config: &RenderConfig) -> fmt::Result {
    let (from, to) = label.leader;
    writeln!(
        svg,
        r##"  <line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="#6b7280" stroke-width="{:.3}"/>"##,
        from.x, from.y, to.x, to.y, config.leader_width * font
    )?;
    let (fill, text) = pill_colors(label.state);
    let corner = label.anchor - R2::new(label.width / 2., label.height / 2.);
    writeln!(
        svg,
        r#"  <rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" rx="{:.3}" fill="{}" stroke="{}" stroke-width="{:.3}"/>"#,
        corner.x, corner.y, label.width, label.height, label.height / 2., fill, text, config.leader_width * font
    )?;
    writeln!(
        svg,
        r#"  <text x="{:.3}" y="{:.3}" font-size="{:.3}" font-family="sans-serif" text-anchor="middle" dominant-baseline="central" fill="{}">{}</text>"#,
        label.anchor.x, label.anchor.y, font, text, escape(&label.text)
    )
}

/// Outline, ticks, leaders and pills, in the diagram's own coordinates.
fn write_diagram(svg: &mut String, diagram: &Diagram, config: &RenderConfig) -> fmt::Result {
    let font = diagram.canvas.font_size;
    let path = diagram
        .vertices
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{} {:.3} {:.3}", if i == 0 { "M" } else { "L" }, v.x, v.y))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(
        svg,
        r#"  <path d="{} Z" fill="{}" stroke="{}" stroke-width="{:.3}" stroke-linejoin="round"/>"#,
        path, config.fill_color, config.outline_color, config.stroke_width * font
    )?;
    write_ticks(svg, diagram, config)?;
    for label in &diagram.labels {
        write_label(svg, label, font, config)?;
    }
    Ok(())
}

fn diagram_svg_inner(diagram: &Diagram, config: &RenderConfig) -> Result<String, fmt::Error> {
    let (w, h) = (diagram.canvas.width, diagram.canvas.height);
    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        w, h, w, h
    )?;
    writeln!(svg, r#"  <rect x="0" y="0" width="{}" height="{}" fill="white"/>"#, w, h)?;
    write_diagram(&mut svg, diagram, config)?;
    writeln!(svg, "</svg>")?;
    Ok(svg)
}

/// Render one diagram to a standalone SVG string
pub fn diagram_svg(diagram: &Diagram, config: &RenderConfig) -> String {
    diagram_svg_inner(diagram, config).expect("writing to a String can't fail")
}

fn write_band(svg: &mut String, band: &Band, font: f64) -> fmt::Result {
    writeln!(
        svg,
        r#"  <rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" rx="1.5" fill="{}"/>"#,
        band.x, band.y, band.width, band.height, band_color(band.level)
    )?;
    writeln!(
        svg,
        r#"  <text x="{:.3}" y="{:.3}" font-size="{:.3}" font-family="sans-serif" font-weight="bold" dominant-baseline="central">{}</text>"#,
        band.x + font,
        band.y + band.height / 2.,
        font * 1.2,
        escape(&band.title)
    )
}

fn write_cell(svg: &mut String, cell: &Cell, font: f64, config: &RenderConfig) -> fmt::Result {
    writeln!(
        svg,
        r##"  <rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" rx="2" fill="none" stroke="#d1d5db" stroke-width="0.3"/>"##,
        cell.x, cell.y, cell.width, cell.height
    )?;
    writeln!(
        svg,
        r#"  <text x="{:.3}" y="{:.3}" font-size="{:.3}" font-family="sans-serif" font-weight="bold">{}.</text>"#,
        cell.x + font / 2.,
        cell.y + font * 1.3,
        font,
        cell.number
    )?;
    writeln!(svg, r#"  <g transform="translate({:.3} {:.3})">"#, cell.origin.x, cell.origin.y)?;
    write_diagram(svg, &cell.diagram, config)?;
    writeln!(svg, "  </g>")?;
    let answer = match &cell.answer {
        Some(answer) => format!("Perimeter = {}", answer),
        None => "Perimeter = ________ cm".to_string(),
    };
    writeln!(
        svg,
        r#"  <text x="{:.3}" y="{:.3}" font-size="{:.3}" font-family="sans-serif">{}</text>"#,
        cell.x + font / 2.,
        cell.y + cell.height - font * 0.6,
        font,
        escape(&answer)
    )
}

fn page_svg_inner(page: &Page, font: f64, config: &RenderConfig) -> Result<String, fmt::Error> {
    let (w, h) = (page.width, page.height);
    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}mm" height="{}mm" viewBox="0 0 {} {}">"#,
        w, h, w, h
    )?;
    writeln!(svg, r#"  <rect x="0" y="0" width="{}" height="{}" fill="white"/>"#, w, h)?;
    let margin = page.cells.first().map_or(12., |c| c.x);
    writeln!(
        svg,
        r#"  <text x="{:.3}" y="{:.3}" font-size="{:.3}" font-family="sans-serif" font-weight="bold">{}</text>"#,
        margin,
        margin + font * 1.2,
        font * 1.6,
        escape(&page.title)
    )?;
    writeln!(
        svg,
        r#"  <text x="{:.3}" y="{:.3}" font-size="{:.3}" font-family="sans-serif" text-anchor="end">Page {}</text>"#,
        w - margin,
        margin + font * 1.2,
        font,
        page.number
    )?;
    for band in &page.bands {
        write_band(&mut svg, band, font)?;
    }
    for cell in &page.cells {
        write_cell(&mut svg, cell, font, config)?;
    }
    writeln!(svg, "</svg>")?;
    Ok(svg)
}

/// Render one worksheet page to SVG, sized in millimetres
pub fn page_svg(page: &Page, font: f64, config: &RenderConfig) -> String {
    page_svg_inner(page, font, config).expect("writing to a String can't fail")
}
