//! 程序入口：解析命令行、初始化日志，并把批处理结果输出到终端

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing_subscriber::fmt::SubscriberBuilder;

use tmp_param_mover::utils::paths::{clean_file_path, expand_origin_paths};
use tmp_param_mover::vm::bridge::{header_lines, summary_lines, STATUS_DONE, STATUS_ERROR_PREFIX};
use tmp_param_mover::{run_batch, MoverConfig};

/// Unity TextMeshPro 字体参数迁移工具
#[derive(Parser, Debug)]
#[command(name = "tmp_param_mover")]
#[command(version, about = "把来源字体资源的参数迁移到原始字体资源")]
struct Cli {
    /// 原始文件或包含 JSON 文件的目录，可重复指定
    #[arg(short = 'o', long = "origin", num_args = 1..)]
    origins: Vec<String>,

    /// 来源文件路径
    #[arg(short = 'f', long = "from")]
    from: Option<String>,

    /// 配置文件（JSON，字段同 MoverConfig，缺省字段取默认值）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 输出目录名（位于原始文件所在目录下，默认 Moved_Parameters）
    #[arg(long)]
    output_dir: Option<String>,

    /// 缩进空格数（默认 2）
    #[arg(long)]
    indent: Option<usize>,

    /// 最终报告格式
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// 日志详细程度（-v, -vv）
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    // 日志走 stderr，stdout 只留给进度与报告
    let _ = SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

/// 加载配置文件，再用命令行参数覆盖
fn load_config(cli: &Cli) -> anyhow::Result<MoverConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("无法读取配置文件 {}", path.display()))?;
            serde_json::from_str::<MoverConfig>(&text)
                .with_context(|| format!("配置文件格式无效 {}", path.display()))?
        }
        None => MoverConfig::default(),
    };
    if let Some(dir) = &cli.output_dir {
        config.output_dir_name = dir.clone();
    }
    if let Some(indent) = cli.indent {
        config.format.indent_width = indent;
    }
    Ok(config)
}

/// 交互式模式：依次询问原始文件与来源文件路径
fn prompt_paths() -> anyhow::Result<(String, String)> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut ask = |label: &str| -> anyhow::Result<String> {
        print!("{}", label);
        io::stdout().flush()?;
        let mut line = String::new();
        input.read_line(&mut line).context("读取输入失败")?;
        Ok(clean_file_path(&line))
    };

    println!("Unity TMP Parameter Mover - 交互式模式");
    println!("提示: 使用 -h 参数查看命令行使用方法");
    println!();
    let origin = ask("请输入原始文件路径: ")?;
    let from = ask("请输入来源文件路径: ")?;
    if origin.is_empty() || from.is_empty() {
        bail!("原始文件或来源文件路径不能为空!");
    }
    Ok((origin, from))
}

fn run(cli: Cli, interactive: bool) -> anyhow::Result<bool> {
    let (origin_inputs, from) = if interactive {
        let (origin, from) = prompt_paths()?;
        (vec![origin], from)
    } else {
        match cli.from.as_deref() {
            Some(f) if !cli.origins.is_empty() => (cli.origins.clone(), f.to_string()),
            _ => bail!("请同时提供 -o/--origin 与 -f/--from 参数，或使用 -h 查看帮助信息。"),
        }
    };

    let origins = expand_origin_paths(&origin_inputs);
    if origins.is_empty() {
        bail!("没有找到任何原始文件");
    }
    let source = PathBuf::from(clean_file_path(&from));
    let config = load_config(&cli)?;
    tracing::debug!("运行配置: {:?}", config);

    let text_mode = cli.format == OutputFormat::Text;
    if text_mode {
        for line in header_lines(origins.len(), &source) {
            println!("{}", line);
        }
    }

    let report = run_batch(&origins, &source, &config, |line| {
        if text_mode {
            println!("{}", line);
        }
    });

    match cli.format {
        OutputFormat::Text => {
            println!();
            for line in summary_lines(&report.summary, report.stopped) {
                println!("{}", line);
            }
            println!("{}", STATUS_DONE);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("报告序列化失败")?;
            println!("{}", json);
        }
    }

    Ok(report.summary.failed == 0)
}

fn main() -> ExitCode {
    let interactive = std::env::args_os().len() <= 1;
    let cli = Cli::parse();

    // 初始化日志输出
    init_logging(cli.verbose);

    let outcome = run(cli, interactive);
    let code = match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("运行失败: {:#}", e);
            eprintln!("{}{:#}", STATUS_ERROR_PREFIX, e);
            ExitCode::from(2)
        }
    };

    // 只在交互式模式下等待用户确认，避免双击运行时窗口直接关闭
    if interactive {
        println!();
        println!("按回车键关闭程序...");
        let mut buf = String::new();
        let _ = io::stdin().lock().read_line(&mut buf);
    }
    code
}
