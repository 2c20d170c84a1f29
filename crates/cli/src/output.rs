//! Terminal output helpers

use colored::Colorize;
use shelfmap_ir::{Aisle, Product};
use shelfmap_render::Color;

pub fn success(message: impl AsRef<str>) {
    println!("{} {}", "OK".green().bold(), message.as_ref());
}

pub fn warning(message: impl AsRef<str>) {
    eprintln!("{}: {}", "warning".yellow().bold(), message.as_ref());
}

pub fn error(message: impl AsRef<str>) {
    eprintln!("{}: {}", "error".red().bold(), message.as_ref());
}

fn swatch(color: Color) -> String {
    let [r, g, b] = color.to_rgb();
    "■".truecolor(r, g, b).to_string()
}

pub fn aisle_line(aisle: &Aisle, members: usize) -> String {
    format!(
        "{} {:<20} {:<12} at ({}, {})  {}x{}  {} products",
        swatch(shelfmap_render::color_for_tag(&aisle.tag)),
        aisle.name.bold(),
        aisle.tag,
        aisle.x,
        aisle.y,
        aisle.width,
        aisle.height,
        members
    )
}

pub fn product_line(product: &Product) -> String {
    let location = match product.cell() {
        Some(cell) => format!("row {}, column {}", cell.row, cell.column),
        None => "unassigned".dimmed().to_string(),
    };
    format!(
        "{:<24} {:<12} {:>8.2}  {}",
        product.name.bold(),
        product.tag,
        product.price,
        location
    )
}

pub fn legend_line(name: &str, color: Color) -> String {
    format!("{} {:<12} {}", swatch(color), name, color.to_css())
}
