use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dhf_cli::types::{OutputSummary, RunResult};

pub fn print_summary(result: &RunResult) {
    print!("{}", render_summary(result));
}

/// Run summary as printed to stdout, ending in a newline.
pub fn render_summary(result: &RunResult) -> String {
    let mut lines = Vec::new();
    if result.dry_run {
        lines.push("Dry run: nothing written".to_string());
    } else {
        lines.push(format!("Output: {}", result.output_dir.display()));
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pipeline"),
        header_cell("File"),
        header_cell("Groups"),
        header_cell("Checks"),
        header_cell("Written"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    let mut total_groups = 0usize;
    for pipeline in &result.pipelines {
        for output in &pipeline.outputs {
            total_groups += output.groups;
            table.add_row(vec![
                dim_cell(pipeline.name),
                Cell::new(&output.file_name)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                count_cell(output.groups),
                count_cell(output.checks),
                written_cell(output),
            ]);
        }
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} files", result.outputs().count()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_groups).add_attribute(Attribute::Bold),
        Cell::new(result.total_checks()).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    lines.push(table.to_string());
    for pipeline in &result.pipelines {
        lines.push(format!(
            "{}: {} checks read from {} input file(s)",
            pipeline.name,
            pipeline.input_records,
            pipeline.inputs.len()
        ));
    }
    lines.push(format!("Total: {} checks", result.total_checks()));
    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

fn written_cell(output: &OutputSummary) -> Cell {
    match output.path {
        Some(_) => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use dhf_cli::types::PipelineResult;

    use super::*;

    fn output(file_name: &str, groups: usize, checks: usize, written: bool) -> OutputSummary {
        OutputSummary {
            file_name: file_name.to_string(),
            path: written.then(|| PathBuf::from("out").join(file_name)),
            groups,
            checks,
        }
    }

    fn result(dry_run: bool) -> RunResult {
        RunResult {
            output_dir: PathBuf::from("out"),
            dry_run,
            pipelines: vec![
                PipelineResult {
                    name: "phases",
                    inputs: vec![PathBuf::from("analysis.csv")],
                    input_records: 4,
                    outputs: vec![
                        output("phase1-validation.yaml", 1, 1, !dry_run),
                        output("phase2-validation.yaml", 2, 3, !dry_run),
                    ],
                },
                PipelineResult {
                    name: "cross-estar",
                    inputs: vec![PathBuf::from("cross.csv"), PathBuf::from("estar.csv")],
                    input_records: 0,
                    outputs: vec![
                        output("cross-cutting-validation.yaml", 0, 0, !dry_run),
                        output("estar-validation.yaml", 0, 0, !dry_run),
                    ],
                },
            ],
        }
    }

    #[test]
    fn summary_lists_files_and_totals() {
        let rendered = render_summary(&result(false));

        assert!(rendered.starts_with("Output: out\n"), "{rendered}");
        assert!(rendered.contains("phase2-validation.yaml"), "{rendered}");
        assert!(rendered.contains("estar-validation.yaml"), "{rendered}");
        assert!(rendered.contains("TOTAL"), "{rendered}");
        assert!(rendered.contains("4 files"), "{rendered}");
        assert!(
            rendered.contains("phases: 4 checks read from 1 input file(s)"),
            "{rendered}"
        );
        assert!(
            rendered.contains("cross-estar: 0 checks read from 2 input file(s)"),
            "{rendered}"
        );
        assert!(rendered.ends_with("Total: 4 checks\n"), "{rendered}");
    }

    #[test]
    fn dry_run_summary_says_nothing_was_written() {
        let rendered = render_summary(&result(true));

        assert!(rendered.starts_with("Dry run: nothing written\n"), "{rendered}");
        assert!(!rendered.contains('✓'), "{rendered}");
    }
}
