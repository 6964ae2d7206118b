pub mod shell;

use std::io::{BufRead, BufReader, IsTerminal};

use clap::Parser;

use crate::shell::{Format, Shell};

type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(clap::Parser, Debug)]
#[command(version = "0.1.0")]
#[command(about = "arithmetic expression shell")]
#[command(long_about = None)]
pub struct AppConfig {
    #[arg(value_name = "FILE", default_value = "-")]
    file: String,
    #[arg(short, long, value_name = "EXPR", allow_hyphen_values = true)]
    expr: Option<String>,
    #[arg(long, default_value = "basic > ")]
    prompt: String,
    #[arg(long, value_name = "NAME")]
    source_name: Option<String>,
    #[arg(long)]
    json: bool,
}

pub fn get_config() -> AppResult<AppConfig> {
    let result = AppConfig::try_parse()
        .map_err(|e| e.to_string())
        .and_then(|config| {
            if config.expr.is_some() && config.file != "-" {
                Err("--expr と入力ファイルは同時に指定できません".to_string())
            } else {
                Ok(config)
            }
        });

    result.map_err(|e| e.into())
}

/// 設定に従って式を評価する
/// 全ての評価に成功した場合に true を返す（対話ループでは個々の失敗を数えない）
pub fn run(config: AppConfig) -> AppResult<bool> {
    let format = if config.json {
        Format::Json
    } else {
        Format::Text
    };
    let source_name = config.source_name.unwrap_or_else(|| match config.file.as_str() {
        "-" => "<stdin>".to_string(),
        path => path.to_string(),
    });
    let mut shell = Shell::new(source_name, format, std::io::stdout().lock());

    if let Some(expr) = config.expr {
        return Ok(shell.eval_line(&expr)?);
    }

    // 端末からの入力時のみプロンプトを表示する
    let prompt = (config.file == "-" && std::io::stdin().is_terminal()).then_some(config.prompt);
    shell.run(open(&config.file)?, prompt.as_deref())?;

    Ok(true)
}

fn open(filename: &str) -> AppResult<Box<dyn BufRead>> {
    match filename {
        "-" => Ok(Box::new(BufReader::new(std::io::stdin()))),
        _ => Ok(Box::new(BufReader::new(
            std::fs::File::open(filename).map_err(|e| format!("{}: {}", e, filename))?,
        ))),
    }
}
