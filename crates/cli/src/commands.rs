//! Command implementations

use crate::output;
use crate::{Command, Context};
use anyhow::{Context as _, bail};
use serde::Serialize;
use shelfmap_core::{AisleId, Category, ProductId, Size};
use shelfmap_ir::{
    Aisle, GridMetrics, JsonFileStore, ProductStore, StoreLayout, available_tags, directions,
    export_products_csv, filter_by_tags, import_products, load_from_store, load_layout,
    parse_products_csv, save_layout, save_to_store,
};
use shelfmap_render::{RenderRequest, Rasterizer, legend, render, to_svg};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Run one command
pub async fn dispatch(ctx: &Context, command: Command) -> anyhow::Result<()> {
    debug!(?command, layout = %ctx.layout_path.display(), "Running command");
    match command {
        Command::Init {
            rows,
            columns,
            force,
        } => init(ctx, rows, columns, force).await,
        Command::Aisles { json } => list_aisles(ctx, json),
        Command::Legend => {
            for (category, color) in legend() {
                println!("{}", output::legend_line(category.display_name(), color));
            }
            Ok(())
        }
        Command::CreateAisle {
            name,
            width,
            height,
            category,
        } => edit(ctx, |layout| {
            let category = Category::from_tag(&category)
                .with_context(|| format!("Unknown category '{}'", category))?;
            let id = layout.create_aisle(&name, width, height, category.as_tag())?;
            let aisle = layout.aisle(id).context("created aisle missing")?;
            Ok(format!(
                "Created aisle '{}' at ({}, {})",
                aisle.name, aisle.x, aisle.y
            ))
        }),
        Command::MoveAisle { aisle, x, y } => edit(ctx, |layout| {
            let id = find_aisle(layout, &aisle)?;
            let origin = layout.move_aisle(id, x, y)?;
            Ok(format!(
                "Moved aisle '{}' to ({}, {})",
                aisle, origin.column, origin.row
            ))
        }),
        Command::DeleteAisle { aisle, yes } => {
            if !yes {
                bail!(
                    "Deleting '{}' unassigns all of its products; pass --yes to confirm",
                    aisle
                );
            }
            edit(ctx, |layout| {
                let id = find_aisle(layout, &aisle)?;
                let members = layout.members(id).count();
                let removed = layout.delete_aisle(id)?;
                Ok(format!(
                    "Deleted aisle '{}' ({} products unassigned)",
                    removed.name, members
                ))
            })
        }
        Command::Assign { product, aisle } => edit(ctx, |layout| {
            let product_id = find_product(layout, &product)?;
            let aisle_id = find_aisle(layout, &aisle)?;
            let cell = layout.assign_product(product_id, aisle_id)?;
            Ok(format!("Placed '{}' at {}", product, cell))
        }),
        Command::Unassign { product } => edit(ctx, |layout| {
            let id = find_product(layout, &product)?;
            layout.unassign_product(id)?;
            Ok(format!("Unassigned '{}'", product))
        }),
        Command::Door { column } => edit(ctx, |layout| {
            let column = layout.set_door(column);
            Ok(format!("Door moved to column {}", column))
        }),
        Command::Resize { rows, columns } => {
            let grid = ctx.settings.grid.grid(rows, columns);
            edit(ctx, |layout| {
                layout.resize_grid(grid);
                Ok(format!("Grid is now {} x {}", grid.rows, grid.columns))
            })
        }
        Command::Search { query, tags, limit } => {
            let layout = open_layout(ctx)?;
            let tagged = filter_by_tags(layout.products(), &tags);
            let query = query.as_deref().map(str::trim).unwrap_or_default();
            let results: Vec<_> = if !query.is_empty() {
                tagged.into_iter().filter(|p| p.matches(query)).take(limit).collect()
            } else if !tags.is_empty() {
                tagged
            } else {
                bail!("Give a search query or at least one --tag");
            };

            if results.is_empty() {
                let available = available_tags(layout.products());
                println!("No products match (tags in use: {})", available.join(", "));
            }
            for product in results {
                println!("{}", output::product_line(product));
            }
            Ok(())
        }
        Command::Directions { product } => {
            let layout = open_layout(ctx)?;
            let id = find_product(&layout, &product)?;
            let product = layout.product(id).context("product missing")?;
            for (step, line) in directions(layout.door_column(), product)?.iter().enumerate() {
                println!("{}. {}", step + 1, line);
            }
            Ok(())
        }
        Command::Render {
            output,
            map,
            selected,
        } => render_layout(ctx, &output, map, selected.as_deref()),
        Command::Save => {
            let layout = open_layout(ctx)?;
            let store = JsonFileStore::new(&ctx.store_path);
            let report = save_to_store(&store, &layout).await?;
            output::success(format!(
                "Saved {} products to {}",
                report.applied.len(),
                ctx.store_path.display()
            ));
            Ok(())
        }
        Command::Load => {
            let store = JsonFileStore::new(&ctx.store_path);
            let layout = load_from_store(&store, &ctx.settings.grid).await?;
            save_layout(&layout, &ctx.layout_path)?;
            output::success(format!(
                "Rebuilt {} from {} products",
                ctx.layout_path.display(),
                layout.products().len()
            ));
            Ok(())
        }
        Command::ImportCsv { file } => {
            let reader = BufReader::new(
                File::open(&file).with_context(|| format!("Cannot open {}", file.display()))?,
            );
            let products = parse_products_csv(reader)?;
            let store = JsonFileStore::new(&ctx.store_path);
            let count = import_products(&store, products).await?;
            output::success(format!("Imported {} products", count));
            Ok(())
        }
        Command::ExportCsv { output: path } => {
            let store = JsonFileStore::new(&ctx.store_path);
            let products = store.list().await?;
            match path {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Cannot create {}", path.display()))?;
                    export_products_csv(&products, BufWriter::new(file))?;
                    output::success(format!(
                        "Exported {} products to {}",
                        products.len(),
                        path.display()
                    ));
                }
                None => {
                    let stdout = std::io::stdout();
                    export_products_csv(&products, stdout.lock())?;
                }
            }
            Ok(())
        }
    }
}

// ============================================================================
// Layout access
// ============================================================================

fn open_layout(ctx: &Context) -> anyhow::Result<StoreLayout> {
    load_layout(&ctx.layout_path).with_context(|| {
        format!(
            "Cannot open layout {} (run `shelfmap init` first)",
            ctx.layout_path.display()
        )
    })
}

/// Load, apply one edit, write back
fn edit<F>(ctx: &Context, f: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut StoreLayout) -> anyhow::Result<String>,
{
    let mut layout = open_layout(ctx)?;
    let message = f(&mut layout)?;
    save_layout(&layout, &ctx.layout_path)?;
    output::success(message);
    Ok(())
}

async fn init(
    ctx: &Context,
    rows: Option<u32>,
    columns: Option<u32>,
    force: bool,
) -> anyhow::Result<()> {
    if ctx.layout_path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            ctx.layout_path.display()
        );
    }

    let store = JsonFileStore::new(&ctx.store_path);
    let mut layout = load_from_store(&store, &ctx.settings.grid).await?;
    if rows.is_some() || columns.is_some() {
        let current = layout.grid();
        let grid = ctx.settings.grid.grid(
            rows.unwrap_or(current.rows),
            columns.unwrap_or(current.columns),
        );
        layout.resize_grid(grid);
    }

    save_layout(&layout, &ctx.layout_path)?;
    output::success(format!(
        "Created {} ({} x {}, {} aisles, {} products)",
        ctx.layout_path.display(),
        layout.grid().rows,
        layout.grid().columns,
        layout.aisles().len(),
        layout.products().len()
    ));
    Ok(())
}

#[derive(Serialize)]
struct AisleSummary<'a> {
    #[serde(flatten)]
    aisle: &'a Aisle,
    products: usize,
}

fn list_aisles(ctx: &Context, json: bool) -> anyhow::Result<()> {
    let layout = open_layout(ctx)?;
    if json {
        let summaries: Vec<_> = layout
            .aisles()
            .iter()
            .map(|aisle| AisleSummary {
                aisle,
                products: layout.members(aisle.id).count(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if layout.aisles().is_empty() {
        println!("No aisles");
    }
    for aisle in layout.aisles() {
        println!("{}", output::aisle_line(aisle, layout.members(aisle.id).count()));
    }
    let unassigned = layout.unassigned_products().count();
    if unassigned > 0 {
        println!("{} unassigned products", unassigned);
    }
    Ok(())
}

fn render_layout(
    ctx: &Context,
    path: &Path,
    map: bool,
    selected: Option<&str>,
) -> anyhow::Result<()> {
    let layout = open_layout(ctx)?;
    let selected = selected.map(|key| find_product(&layout, key)).transpose()?;

    let request = if map {
        RenderRequest::store_map(layout.products())
    } else {
        let grid = layout.grid();
        let caps = ctx.settings.canvas.caps();
        let canvas = Size::new(
            (grid.columns + 1) as f32 * caps.width,
            (grid.rows + 1) as f32 * caps.height,
        );
        RenderRequest::editor(&layout, GridMetrics::with_caps(grid, canvas, caps))
    };
    let scene = render(&request.with_selected(selected));

    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        let mut file = BufWriter::new(
            File::create(path).with_context(|| format!("Cannot create {}", path.display()))?,
        );
        file.write_all(to_svg(&scene).as_bytes())?;
        file.flush()?;
    } else {
        let rasterizer = Rasterizer::from_font_path(ctx.settings.render.font_path.as_deref())?;
        if !rasterizer.has_font() {
            output::warning("No font configured (render.font_path); labels are omitted");
        }
        rasterizer.save_png(&scene, path)?;
    }

    output::success(format!("Wrote {}", path.display()));
    Ok(())
}

// ============================================================================
// Lookup
// ============================================================================

/// Resolve an aisle by id or case-insensitive name
pub fn find_aisle(layout: &StoreLayout, key: &str) -> anyhow::Result<AisleId> {
    if let Ok(id) = key.parse::<AisleId>() {
        if layout.aisle(id).is_some() {
            return Ok(id);
        }
    }
    layout
        .aisles()
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(key.trim()))
        .map(|a| a.id)
        .with_context(|| format!("No aisle named '{}'", key))
}

/// Resolve a product by id or case-insensitive name
pub fn find_product(layout: &StoreLayout, key: &str) -> anyhow::Result<ProductId> {
    if let Ok(id) = key.parse::<ProductId>() {
        if layout.product(id).is_some() {
            return Ok(id);
        }
    }
    layout
        .products()
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(key.trim()))
        .map(|p| p.id)
        .with_context(|| format!("No product named '{}'", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfmap_ir::{Grid, Product};

    fn layout() -> StoreLayout {
        let aisle = Aisle::new("Snacks", "toys").at(2, 2).with_size(2, 1);
        let product = Product::new("Chips").at(2, 3).in_aisle(aisle.id, "Snacks");
        StoreLayout::from_parts(Grid::new(5, 6), 3, vec![aisle], vec![product])
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let layout = layout();
        assert_eq!(find_aisle(&layout, "snacks").unwrap(), layout.aisles()[0].id);
        assert_eq!(find_product(&layout, "CHIPS").unwrap(), layout.products()[0].id);
    }

    #[test]
    fn test_find_by_id() {
        let layout = layout();
        let id = layout.aisles()[0].id;
        assert_eq!(find_aisle(&layout, &id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_find_unknown() {
        let layout = layout();
        let err = find_product(&layout, "Bread").unwrap_err();
        assert!(err.to_string().contains("No product named 'Bread'"));
    }
}
