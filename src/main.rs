//! rscategorizer 命令行入口

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rscategorizer::{
    Classifier, CompiledRuleTable, ConfigManager, RuleLoader, RuleOrigin, process_file,
};

#[derive(Debug, Parser)]
#[command(name = "rscategorizer", version, about = "Rule-based retail product categorizer")]
struct Cli {
    /// 输出 info 级别日志（RUST_LOG 优先）；check-rules 时列出全部正则
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct RulesArg {
    /// 规则文件（.json / .mp / .msgpack），缺省使用内置规则
    #[arg(long, env = "RSCATEGORIZER_RULES")]
    rules: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 分类CSV文件并追加 Main_Category / Subcategory 列
    Classify {
        input: PathBuf,
        #[arg(short, long, default_value = "categorized_products.csv")]
        output: PathBuf,
        #[command(flatten)]
        rules: RulesArg,
        /// 关闭并行分类
        #[arg(long)]
        sequential: bool,
        /// 不输出分布统计
        #[arg(long)]
        no_report: bool,
    },
    /// 加载并校验规则表
    CheckRules {
        #[command(flatten)]
        rules: RulesArg,
    },
    /// 导出内置规则表
    ExportRules {
        output: PathBuf,
    },
    /// 分类单条记录
    One {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        breadcrumb2: Option<String>,
        #[arg(long)]
        breadcrumb3: Option<String>,
        #[command(flatten)]
        rules: RulesArg,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_classifier(origin: &RuleOrigin) -> Result<Classifier> {
    Classifier::from_origin(origin).with_context(|| format!("failed to build classifier from {:?}", origin))
}

/// 逐条列出编译后的正则及其匹配引擎
fn print_patterns(table: &CompiledRuleTable) {
    for category in table.categories.iter() {
        println!("{}{}", category.name, if category.scored { "" } else { " (not scored)" });
        for pattern in &category.patterns {
            println!("  {:<12}{}", pattern.matcher.describe(), pattern.matcher.as_str());
        }
        for sub in &category.subcategories {
            println!("  {} (weight {})", sub.name, sub.weight);
            for pattern in &sub.patterns {
                println!("    {:<12}{}", pattern.matcher.describe(), pattern.matcher.as_str());
            }
        }
    }
}

fn rule_origin(rules: RulesArg) -> RuleOrigin {
    ConfigManager::custom().rules_file(rules.rules).build().rule_origin
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Classify { input, output, rules, sequential, no_report } => {
            let config = ConfigManager::custom()
                .rules_file(rules.rules)
                .parallel(!sequential)
                .print_report(!no_report)
                .build();
            debug!(?config, "classify");

            let classifier = load_classifier(&config.rule_origin)?;
            let report = process_file(&classifier, &input, &output, &config)
                .with_context(|| format!("error processing file {}", input.display()))?;

            if config.print_report {
                println!("\n{}", report.distribution);
            }
            println!("\n{}", report.summary);
            println!("Processing complete. Results saved to {}", output.display());
        }
        Command::CheckRules { rules } => {
            let origin = rule_origin(rules);
            let rule_table = RuleLoader::load(&origin)
                .with_context(|| format!("failed to load rules from {:?}", origin))?;
            let classifier = Classifier::new(&rule_table).context("rule table is invalid")?;
            let table = classifier.rule_table();
            println!(
                "rule table OK: version {}, {} main categories ({} scored), {} title keywords, {} patterns",
                table.version.as_deref().unwrap_or("unversioned"),
                table.categories.len(),
                table.scored_categories().count(),
                table.keywords.len(),
                rule_table.pattern_count()
            );
            if cli.verbose {
                print_patterns(table);
            }
        }
        Command::ExportRules { output } => {
            let table = RuleLoader::embedded().context("embedded rule table is invalid")?;
            RuleLoader::save(&table, &output)
                .with_context(|| format!("failed to write rules to {}", output.display()))?;
            println!("Exported {} categories to {}", table.categories.len(), output.display());
        }
        Command::One { title, url, breadcrumb2, breadcrumb3, rules } => {
            let classifier = load_classifier(&rule_origin(rules))?;
            let (result, phase) = classifier.classify_traced(
                url.as_deref(),
                title.as_deref(),
                breadcrumb2.as_deref(),
                breadcrumb3.as_deref(),
            );
            println!("{}\t{}\t({})", result.main_category, result.subcategory, phase);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
