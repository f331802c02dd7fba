// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// RAG FORMAT CLI
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// CLI para formatar respostas do pipeline RAG.
//
// Uso:
//   rag-format-cli response.json
//   cat response.json | rag-format-cli --plain --lang ru -
//   rag-format-cli --summary response.json
//   rag-format-cli --confidence 0.9,0.72,0.65 --consistency 0.7
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{bail, Context};
use rag_formatter::{load_formatter_config, Language, ResponseFormatter, ResponsePayload};

/// Opções de linha de comando
#[derive(Debug, Default)]
struct CliArgs {
    plain: bool,
    summary: bool,
    max_sources: Option<usize>,
    language: Option<Language>,
    confidence_scores: Option<Vec<f64>>,
    consistency: Option<f64>,
    input: Option<String>,
}

fn print_usage(program: &str) {
    eprintln!("RAG Format CLI v{}", rag_formatter::VERSION);
    eprintln!();
    eprintln!("Uso: {} [opções] <arquivo.json | ->", program);
    eprintln!();
    eprintln!("Opções:");
    eprintln!("  --plain                 Texto puro em vez de markdown");
    eprintln!("  --max-sources <n>       Máximo de fontes exibidas (padrão: 5)");
    eprintln!("  --lang <código>         Idioma dos rótulos: en, ru, pt");
    eprintln!("  --summary               Imprime apenas o resumo curto");
    eprintln!("  --confidence <scores>   Calcula confiança (scores separados por vírgula)");
    eprintln!("  --consistency <valor>   Consistência da resposta (padrão: 0.8)");
    eprintln!();
    eprintln!("Exemplos:");
    eprintln!("  {} response.json", program);
    eprintln!("  cat response.json | {} --plain --lang ru -", program);
    eprintln!("  {} --confidence 0.9,0.72 --consistency 0.7", program);
}

fn parse_args(args: &[String]) -> anyhow::Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--plain" => parsed.plain = true,
            "--summary" => parsed.summary = true,
            "--max-sources" => {
                let value = iter.next().context("--max-sources requer um valor")?;
                let max: usize = value
                    .parse()
                    .with_context(|| format!("--max-sources inválido: {}", value))?;
                parsed.max_sources = Some(max.max(1));
            }
            "--lang" => {
                let value = iter.next().context("--lang requer um valor")?;
                parsed.language = Some(Language::from_code(value));
            }
            "--confidence" => {
                let value = iter.next().context("--confidence requer uma lista de scores")?;
                let scores = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.parse::<f64>().with_context(|| format!("score inválido: {}", s)))
                    .collect::<anyhow::Result<Vec<_>>>()?;
                parsed.confidence_scores = Some(scores);
            }
            "--consistency" => {
                let value = iter.next().context("--consistency requer um valor")?;
                parsed.consistency = Some(
                    value
                        .parse()
                        .with_context(|| format!("--consistency inválido: {}", value))?,
                );
            }
            other if other.starts_with("--") => bail!("opção desconhecida: {}", other),
            other => parsed.input = Some(other.to_string()),
        }
    }

    Ok(parsed)
}

fn main() -> anyhow::Result<()> {
    // Carregar .env antes de ler a configuração
    let _ = dotenvy::dotenv();

    // Inicializar logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("rag-format-cli");

    if args.len() < 2 {
        print_usage(program);
        std::process::exit(1);
    }

    let cli = parse_args(&args[1..])?;

    let mut config = load_formatter_config();
    if cli.plain {
        config.use_markdown = false;
    }
    if let Some(max) = cli.max_sources {
        config.max_sources = max;
    }
    if let Some(language) = cli.language {
        config.language = language;
    }

    let formatter = ResponseFormatter::new(config);

    if let Some(scores) = &cli.confidence_scores {
        let assessment = formatter.calculate_confidence(scores, cli.consistency);
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    let payload = match cli.input.as_deref() {
        None | Some("-") => ResponsePayload::from_reader(io::stdin().lock())
            .context("Falha ao ler payload da entrada padrão")?,
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Falha ao abrir {}", path))?;
            ResponsePayload::from_reader(BufReader::new(file))
                .with_context(|| format!("Falha ao ler payload de {}", path))?
        }
    };

    log::info!(
        "Formatando resposta com {} fontes (markdown={}, idioma={})",
        payload.sources.len(),
        formatter.config().use_markdown,
        formatter.config().language
    );

    let structured = formatter.structure(
        &payload.answer,
        &payload.explanation,
        &payload.sources,
        &payload.confidence,
    );

    if cli.summary {
        println!("{}", formatter.summarize(&structured));
    } else {
        println!("{}", formatter.render(&structured));
    }

    Ok(())
}
