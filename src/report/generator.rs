//! Report generation.
//!
//! This module assembles a `Report` from aggregator output and renders it
//! as terminal text, Markdown or JSON.

use crate::cli::OutputFormat;
use crate::config::ReportConfig;
use crate::dataset::Dataset;
use crate::models::{CategorySummary, EmotionSummary, Report, ReportMetadata, Summary, TableData};
use anyhow::Result;
use chrono::Utc;

const EMOTIONS_TITLE: &str = "Resumen por promedio";
const PREDOMINANT_TITLE: &str = "Frecuencia de emoción predominante";
const TREND_TITLE: &str = "Frecuencia de emoción en tendencia";
const TABLE_TITLE: &str = "Contenido completo del archivo";

/// Build a report for `dataset` from its computed summary.
pub fn build_report(dataset: &Dataset, summary: Summary, include_table: bool) -> Report {
    let metadata = ReportMetadata {
        source: dataset.name.clone(),
        generated_at: Utc::now(),
        row_count: dataset.row_count(),
        column_count: dataset.column_count(),
        emotion_columns_found: summary.emotions.len(),
    };

    let table = include_table.then(|| TableData {
        headers: dataset.headers().to_vec(),
        rows: dataset.rows().to_vec(),
    });

    Report {
        metadata,
        summary,
        table,
    }
}

/// Render a report in the requested format.
pub fn render(report: &Report, format: OutputFormat, config: &ReportConfig) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(generate_text_report(report, config)),
        OutputFormat::Markdown => Ok(generate_markdown_report(report, config)),
        OutputFormat::Json => generate_json_report(report),
    }
}

/// Generate a plain-text report for the terminal.
pub fn generate_text_report(report: &Report, config: &ReportConfig) -> String {
    let mut output = String::new();
    let summary = &report.summary;

    output.push_str(&format!("📊 Análisis emocional — {}\n", report.metadata.source));
    output.push_str(&format!(
        "   {} filas, {} columnas\n\n",
        report.metadata.row_count, report.metadata.column_count
    ));

    if !summary.valence.is_empty() {
        output.push_str(&summary.valence.to_line(config.mean_decimals));
        output.push_str("\n\n");
    }

    output.push_str(&text_table(
        EMOTIONS_TITLE,
        ["Emoción", "Promedio", "% sobre total"],
        &emotion_rows(&summary.emotions, config),
    ));
    output.push_str(&text_table(
        PREDOMINANT_TITLE,
        ["Emoción", "Valor", "% sobre total"],
        &category_rows(&summary.predominant, config),
    ));
    output.push_str(&text_table(
        TREND_TITLE,
        ["Emoción", "Valor", "% sobre total"],
        &category_rows(&summary.trend, config),
    ));

    if let Some(ref table) = report.table {
        output.push_str(&format!("{}\n\n", TABLE_TITLE));
        output.push_str(&table.headers.join("\t"));
        output.push('\n');
        for row in &table.rows {
            output.push_str(&row.join("\t"));
            output.push('\n');
        }
    }

    output
}

/// Generate a Markdown report.
pub fn generate_markdown_report(report: &Report, config: &ReportConfig) -> String {
    let mut output = String::new();
    let summary = &report.summary;

    output.push_str(&format!("# Análisis emocional — {}\n\n", report.metadata.source));
    output.push_str(&generate_metadata_section(&report.metadata));

    if !summary.valence.is_empty() {
        output.push_str(&format!(
            "*{}*\n\n",
            summary.valence.to_line(config.mean_decimals)
        ));
    }

    output.push_str(&markdown_table(
        EMOTIONS_TITLE,
        ["Emoción", "Promedio", "% sobre total"],
        &emotion_rows(&summary.emotions, config),
    ));
    output.push_str(&markdown_table(
        PREDOMINANT_TITLE,
        ["Emoción", "Valor", "% sobre total"],
        &category_rows(&summary.predominant, config),
    ));
    output.push_str(&markdown_table(
        TREND_TITLE,
        ["Emoción", "Valor", "% sobre total"],
        &category_rows(&summary.trend, config),
    ));

    if let Some(ref table) = report.table {
        output.push_str(&format!("## {}\n\n", TABLE_TITLE));
        output.push_str(&markdown_row(&table.headers));
        output.push_str(&format!("|{}\n", "---|".repeat(table.headers.len())));
        for row in &table.rows {
            output.push_str(&markdown_row(row));
        }
        output.push('\n');
    }

    output
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str(&format!("- **Archivo:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Generado:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Filas:** {}\n", metadata.row_count));
    section.push_str(&format!("- **Columnas:** {}\n", metadata.column_count));
    section.push_str(&format!(
        "- **Emociones encontradas:** {}\n\n",
        metadata.emotion_columns_found
    ));

    section
}

fn emotion_rows(emotions: &[EmotionSummary], config: &ReportConfig) -> Vec<[String; 3]> {
    emotions
        .iter()
        .map(|e| {
            [
                e.label.clone(),
                format!("{:.*}", config.mean_decimals, e.mean),
                format!("{:.*}%", config.percent_decimals, e.percent_in_complex),
            ]
        })
        .collect()
}

fn category_rows(categories: &[CategorySummary], config: &ReportConfig) -> Vec<[String; 3]> {
    categories
        .iter()
        .map(|c| {
            [
                c.label.clone(),
                c.count.to_string(),
                format!("{:.*}%", config.percent_decimals, c.percent_of_total),
            ]
        })
        .collect()
}

fn text_table(title: &str, header: [&str; 3], rows: &[[String; 3]]) -> String {
    let mut widths = header.map(|h| h.chars().count());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut section = format!("{}\n", title);
    if rows.is_empty() {
        section.push_str("  (sin datos)\n\n");
        return section;
    }

    let line = |cells: [&str; 3]| {
        format!(
            "  {:<w0$}  {:>w1$}  {:>w2$}\n",
            cells[0],
            cells[1],
            cells[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        )
    };

    section.push_str(&line(header));
    for row in rows {
        section.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
    }
    section.push('\n');
    section
}

fn markdown_table(title: &str, header: [&str; 3], rows: &[[String; 3]]) -> String {
    let mut section = format!("## {}\n\n", title);
    if rows.is_empty() {
        section.push_str("*Sin datos.*\n\n");
        return section;
    }

    section.push_str(&format!("| {} | {} | {} |\n", header[0], header[1], header[2]));
    section.push_str("|:---|---:|---:|\n");
    for row in rows {
        section.push_str(&markdown_row(row));
    }
    section.push('\n');
    section
}

fn markdown_row(cells: &[String]) -> String {
    let escaped: Vec<String> = cells.iter().map(|c| escape_markdown_cell(c)).collect();
    format!("| {} |\n", escaped.join(" | "))
}

fn escape_markdown_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Aggregator, ColumnSpec};
    use crate::dataset::loader::parse_reader;
    use crate::labels::LabelMap;

    const CSV: &str = "Joy,Fear,Predominant,Trend,Positive valence,Intensity,Note\n\
                       1.0,1.0,Joy,Fear,0.5,0.2,a|b\n\
                       0.0,1.0,Joy,Fear,0.3,0.4,\n\
                       2.0,1.0,Fear,Boredom,0.1,0.6,\n";

    fn create_test_report(include_table: bool) -> Report {
        let dataset = parse_reader("session.csv", CSV.as_bytes()).unwrap();
        let summary =
            Aggregator::new(LabelMap::builtin(), ColumnSpec::default()).summarize(&dataset);
        build_report(&dataset, summary, include_table)
    }

    #[test]
    fn test_build_report_metadata() {
        let report = create_test_report(true);
        assert_eq!(report.metadata.source, "session.csv");
        assert_eq!(report.metadata.row_count, 3);
        assert_eq!(report.metadata.column_count, 7);
        assert_eq!(report.metadata.emotion_columns_found, 2);
        assert_eq!(report.table.as_ref().map(|t| t.rows.len()), Some(3));

        assert!(create_test_report(false).table.is_none());
    }

    #[test]
    fn test_generate_text_report() {
        let report = create_test_report(false);
        let text = generate_text_report(&report, &ReportConfig::default());

        assert!(text.contains("session.csv"));
        assert!(text.contains("Valencia positiva: 0.3000 | Intensidad emocional: 0.4000"));
        assert!(text.contains(EMOTIONS_TITLE));
        assert!(text.contains("Felicidad"));
        assert!(text.contains("1.0000"));
        assert!(text.contains("50.00%"));
        assert!(text.contains("66.67%"));
        assert!(text.contains("Boredom"));
        assert!(!text.contains(TABLE_TITLE));
    }

    #[test]
    fn test_generate_text_report_empty_sections() {
        let dataset = parse_reader("plain.csv", "Note\nhi\n".as_bytes()).unwrap();
        let summary =
            Aggregator::new(LabelMap::builtin(), ColumnSpec::default()).summarize(&dataset);
        let report = build_report(&dataset, summary, false);
        let text = generate_text_report(&report, &ReportConfig::default());

        assert_eq!(text.matches("(sin datos)").count(), 3);
        assert!(!text.contains("Valencia"));
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report(true);
        let markdown = generate_markdown_report(&report, &ReportConfig::default());

        assert!(markdown.contains("# Análisis emocional — session.csv"));
        assert!(markdown.contains(&format!("## {}", EMOTIONS_TITLE)));
        assert!(markdown.contains(&format!("## {}", PREDOMINANT_TITLE)));
        assert!(markdown.contains(&format!("## {}", TREND_TITLE)));
        assert!(markdown.contains("| Felicidad | 2 | 66.67% |"));
        assert!(markdown.contains("| Miedo | 1.0000 | 50.00% |"));
        assert!(markdown.contains(&format!("## {}", TABLE_TITLE)));
        assert!(markdown.contains("a\\|b"));
    }

    #[test]
    fn test_precision_is_configurable() {
        let report = create_test_report(false);
        let config = ReportConfig {
            include_table: false,
            mean_decimals: 1,
            percent_decimals: 0,
        };
        let markdown = generate_markdown_report(&report, &config);
        assert!(markdown.contains("| Felicidad | 2 | 67% |"));
        assert!(markdown.contains("| Miedo | 1.0 | 50% |"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report(true);
        let json = generate_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metadata"]["source"], "session.csv");
        assert_eq!(value["summary"]["predominant"][0]["label"], "Felicidad");
        assert_eq!(value["summary"]["predominant"][0]["count"], 2);
        assert_eq!(value["summary"]["valence"][0]["column"], "Positive valence");
        assert_eq!(value["table"]["headers"][0], "Joy");
    }

    #[test]
    fn test_json_omits_table_when_disabled() {
        let report = create_test_report(false);
        let json = render(&report, OutputFormat::Json, &ReportConfig::default()).unwrap();
        assert!(!json.contains("\"table\""));
    }

    #[test]
    fn test_escape_markdown_cell() {
        assert_eq!(escape_markdown_cell("a|b"), "a\\|b");
        assert_eq!(escape_markdown_cell("line\nbreak"), "line break");
    }
}
