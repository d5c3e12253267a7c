//! Cangliang - 张爱玲风格小说生成器
//!
//! 命令行入口：加载配置、初始化日志、组装适配器并分派子命令

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use cangliang::application::{
    GenerateNovel, GenerateNovelHandler, GetNovel, GetNovelHandler, ListNovels,
    ListNovelsHandler, NovelGenerator, RenderNovel, RenderNovelHandler, StyleCorpusPort,
    DEFAULT_SAMPLE_LENGTH,
};
use cangliang::config::{load_config_from_path, print_config, AppConfig};
use cangliang::domain::novel::{ChapterNumber, NovelId};
use cangliang::infrastructure::adapters::{create_language_model, FileStyleCorpus};
use cangliang::infrastructure::persistence::{create_pool, run_migrations, SqliteNovelRepository};
use cangliang::infrastructure::render::HtmlRenderer;

#[derive(Debug, Parser)]
#[command(name = "cangliang", version, about = "张爱玲风格小说生成器")]
struct Cli {
    /// 配置文件路径（默认搜索 config.toml / config.local.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 生成完整小说：大纲、逐章正文、入库并输出 HTML
    Generate(GenerateArgs),
    /// 只生成情节大纲
    Plot(PlotArgs),
    /// 根据大纲生成单独一章
    Chapter(ChapterArgs),
    /// 润色一段文字
    Polish(PolishArgs),
    /// 列出已保存的小说
    List,
    /// 查看一部小说的大纲与章节
    Show { id: NovelId },
    /// 把已保存的小说渲染为 HTML
    Render {
        id: NovelId,
        #[arg(long)]
        output: PathBuf,
    },
    /// 从风格语料中随机抽取一段
    Sample {
        #[arg(long, default_value_t = DEFAULT_SAMPLE_LENGTH)]
        length: usize,
    },
}

#[derive(Debug, Args)]
struct ModelArgs {
    /// 后端：groq / deepseek / qwen / gemini
    #[arg(long)]
    provider: Option<String>,

    /// 显式 API Key（优先于环境变量）
    #[arg(long)]
    api_key: Option<String>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    theme: String,
    #[arg(long)]
    setting: String,
    #[arg(long, default_value_t = 3)]
    chapters: u32,
    #[arg(long)]
    output_dir: Option<PathBuf>,
    #[command(flatten)]
    model: ModelArgs,
}

#[derive(Debug, Args)]
struct PlotArgs {
    #[arg(long)]
    theme: String,
    #[arg(long)]
    setting: String,
    #[command(flatten)]
    model: ModelArgs,
}

#[derive(Debug, Args)]
struct ChapterArgs {
    /// 大纲文件
    #[arg(long)]
    outline: PathBuf,
    #[arg(long)]
    number: u32,
    /// 前情提要文件
    #[arg(long)]
    context: Option<PathBuf>,
    #[command(flatten)]
    model: ModelArgs,
}

#[derive(Debug, Args)]
struct PolishArgs {
    #[arg(long)]
    input: PathBuf,
    #[command(flatten)]
    model: ModelArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 日志写到 stderr，stdout 只输出生成的文本
    let log_filter = format!("{},cangliang={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    print_config(&config);

    match cli.command {
        Command::Generate(args) => run_generate(&config, args).await,
        Command::Plot(args) => run_plot(&config, args).await,
        Command::Chapter(args) => run_chapter(&config, args).await,
        Command::Polish(args) => run_polish(&config, args).await,
        Command::List => run_list(&config).await,
        Command::Show { id } => run_show(&config, id).await,
        Command::Render { id, output } => run_render(&config, id, output).await,
        Command::Sample { length } => run_sample(&config, length).await,
    }
}

async fn run_generate(config: &AppConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let generator = build_generator(config, &args.model).await?;
    let repo = open_repository(config).await?;

    let handler = GenerateNovelHandler::new(generator, repo, Arc::new(HtmlRenderer::new()))
        .with_context_chars(config.generation.context_chars);

    let response = handler
        .handle(GenerateNovel {
            title: args.title,
            theme: args.theme,
            setting: args.setting,
            chapter_count: args.chapters,
            output_dir: args.output_dir.unwrap_or_else(|| config.output.dir.clone()),
        })
        .await?;

    println!("小说 ID: {}", response.novel_id);
    println!("输出文件: {}", response.output_path.display());
    println!("总字数: {}", response.total_chars);
    Ok(())
}

async fn run_plot(config: &AppConfig, args: PlotArgs) -> anyhow::Result<()> {
    let generator = build_generator(config, &args.model).await?;
    let outline = generator.generate_plot(&args.theme, &args.setting).await?;
    println!("{outline}");
    Ok(())
}

async fn run_chapter(config: &AppConfig, args: ChapterArgs) -> anyhow::Result<()> {
    let number = ChapterNumber::new(args.number)?;
    let outline = read_text(&args.outline).await?;
    let previous_context = match &args.context {
        Some(path) => read_text(path).await?,
        None => String::new(),
    };

    let generator = build_generator(config, &args.model).await?;
    let chapter = generator
        .generate_chapter(&outline, number, &previous_context)
        .await?;
    println!("{chapter}");
    Ok(())
}

async fn run_polish(config: &AppConfig, args: PolishArgs) -> anyhow::Result<()> {
    let text = read_text(&args.input).await?;
    let generator = build_generator(config, &args.model).await?;
    let polished = generator.polish_text(&text).await?;
    println!("{polished}");
    Ok(())
}

async fn run_list(config: &AppConfig) -> anyhow::Result<()> {
    let novels = ListNovelsHandler::new(open_repository(config).await?)
        .handle(ListNovels)
        .await?;

    if novels.is_empty() {
        println!("暂无保存的小说");
        return Ok(());
    }

    for novel in novels {
        println!(
            "{}\t{}\t{} 章\t{}",
            novel.id,
            novel.title,
            novel.chapter_count,
            novel
                .created_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

async fn run_show(config: &AppConfig, id: NovelId) -> anyhow::Result<()> {
    let novel = GetNovelHandler::new(open_repository(config).await?)
        .handle(GetNovel { novel_id: id })
        .await?;

    let Some(novel) = novel else {
        println!("未找到小说 {id}");
        return Ok(());
    };

    println!("《{}》", novel.title());
    println!("主题：{}", novel.theme());
    println!("背景：{}", novel.setting());
    println!();
    println!("【情节大纲】");
    println!("{}", novel.plot_outline());
    for chapter in novel.chapters() {
        println!();
        println!("【第 {} 章】", chapter.number());
        println!("{}", chapter.content());
    }
    Ok(())
}

async fn run_render(config: &AppConfig, id: NovelId, output: PathBuf) -> anyhow::Result<()> {
    RenderNovelHandler::new(open_repository(config).await?, Arc::new(HtmlRenderer::new()))
        .handle(RenderNovel {
            novel_id: id,
            output_path: output.clone(),
        })
        .await?;

    println!("输出文件: {}", output.display());
    Ok(())
}

async fn run_sample(config: &AppConfig, length: usize) -> anyhow::Result<()> {
    let corpus = FileStyleCorpus::open(&config.corpus.dir).await?;
    println!("{}", corpus.sample(length));
    Ok(())
}

/// 组装生成器：后端 + 风格语料
///
/// 后端配置错误（未知后端、缺少凭证）在这里立即返回
async fn build_generator(
    config: &AppConfig,
    args: &ModelArgs,
) -> anyhow::Result<Arc<NovelGenerator>> {
    let provider = args
        .provider
        .as_deref()
        .unwrap_or(&config.generation.provider);
    let api_key = args
        .api_key
        .as_deref()
        .or(config.generation.api_key.as_deref());

    let model = create_language_model(provider, api_key, &config.generation, &config.providers)?;
    let corpus = FileStyleCorpus::open(&config.corpus.dir).await?;

    Ok(Arc::new(
        NovelGenerator::new(model, Arc::new(corpus))
            .with_snippet_length(config.generation.snippet_length),
    ))
}

async fn open_repository(config: &AppConfig) -> anyhow::Result<Arc<SqliteNovelRepository>> {
    let pool = create_pool(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.path))?;
    run_migrations(&pool).await?;
    Ok(Arc::new(SqliteNovelRepository::new(pool)))
}

async fn read_text(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}
