use serde::Serialize;
use shibou_lens_lib::models::{Assessment, Locale};
use shibou_lens_lib::services::catalog::{BundledCatalog, MessageCatalog};
use shibou_lens_lib::services::detection::{name_key, tier_bounds, Analyzer};
use shibou_lens_lib::services::extraction::{PlainTextExtractor, TextExtractor};
use shibou_lens_lib::services::text_processor::Document;

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output<'a> {
    file: &'a str,
    locale: Locale,
    chars: usize,
    sentences: &'a [String],
    assessment: &'a Assessment,
}

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  cargo run --bin feature_dump -- <essay.txt> [--locale <ja-JP|zh-CN>] [--json]\n\nNotes:\n  - Prints raw statistics, humanness scores, levels and tiers for each dimension.\n  - Set RUST_LOG=debug to also see the engine's tracing output."
        );
        return Ok(());
    }

    shibou_lens_lib::init_logging();

    let path = args[1].clone();
    let locale = parse_arg_value(&args, "--locale")
        .map(|t| Locale::from_tag(&t))
        .unwrap_or_default();
    let as_json = has_flag(&args, "--json");

    let bytes = std::fs::read(&path).map_err(|e| format!("read file failed: {}", e))?;
    let text = PlainTextExtractor
        .extract(&path, &bytes)
        .map_err(|e| e.to_string())?;

    let analyzer = Analyzer::builtin();
    let doc = Document::prepare(&text);
    let assessment = analyzer.assess(&text);

    if as_json {
        let out = Output {
            file: &path,
            locale,
            chars: doc.char_len(),
            sentences: &doc.sentences,
            assessment: &assessment,
        };
        let json = serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?;
        println!("{}", json);
        return Ok(());
    }

    let catalog = BundledCatalog::shared();

    println!("File: {}", path);
    println!("Locale: {}", locale);
    println!("Normalized: {} chars, {} sentences", doc.char_len(), doc.sentences.len());
    for (i, s) in doc.sentences.iter().take(10).enumerate() {
        println!("[S{:03}] chars={}  {}", i, s.chars().count(), preview(s, 60));
    }
    if doc.sentences.len() > 10 {
        println!("... ({} more sentences)", doc.sentences.len() - 10);
    }
    println!();

    for dim in &assessment.dimensions {
        let feature = assessment.features.get(dim.dimension);
        let bounds = tier_bounds(dim.dimension);
        let label = catalog
            .resolve(&name_key(dim.dimension), locale)
            .unwrap_or_default();
        println!(
            "{:<20} raw={:<10.6} score={:.4} level={:>4.1} tier={:<6} bounds={}/{}{}  {}",
            dim.dimension.as_str(),
            feature.raw,
            dim.score,
            dim.level,
            dim.tier.as_str(),
            bounds.medium,
            bounds.high,
            if feature.fallback { " (fallback)" } else { "" },
            label
        );
    }
    println!();
    println!(
        "AI likelihood: {:.4}  overall AI score: {}",
        assessment.ai_likelihood, assessment.overall_ai_score
    );

    Ok(())
}
