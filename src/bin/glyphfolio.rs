use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use glyphfolio::{
    Clock as _, DriverEvent, FolioConfig, FrameDriver, Millis, MonotonicClock, OwnerId,
    ProfilePage, ResumeData, ResumeLoader, Scheduler, Theme, ThemeController, TimingVariant,
    build_plan,
    resume::loader::{AutoFetch, CachedFetch, is_curl_on_path},
    theme::{FileThemeStore, MemoryThemeStore, ThemeStore, system_preference},
};

#[derive(Parser, Debug)]
#[command(name = "glyphfolio", version)]
struct Cli {
    /// Configuration JSON. Environment overrides apply on top.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the reveal plan for a string as JSON.
    Plan(PlanArgs),
    /// Print every frame of a single reveal.
    Frames(FramesArgs),
    /// Render the profile page at given instants, or play it in real time.
    Page(PageArgs),
    /// Check a resume JSON file.
    Validate(ValidateArgs),
    /// Show or toggle the saved theme.
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantChoice {
    NonCycled,
    Cycled,
    Typewriter,
}

impl VariantChoice {
    fn timing(self) -> TimingVariant {
        match self {
            Self::NonCycled => TimingVariant::default(),
            Self::Cycled => TimingVariant::cycled(),
            Self::Typewriter => TimingVariant::typewriter(),
        }
    }
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Text to plan.
    text: String,

    #[arg(long, value_enum)]
    variant: Option<VariantChoice>,

    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Text to reveal.
    text: String,

    #[arg(long, value_enum)]
    variant: Option<VariantChoice>,

    #[arg(long)]
    seed: Option<u64>,

    /// Start delay in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    delay: f64,
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Resume JSON file. Without it the configured link (or the embedded document) is used.
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Print the page at these instants (milliseconds). Defaults to the settled page.
    #[arg(long = "at", value_delimiter = ',')]
    at: Vec<f64>,

    /// Play in real time until settled.
    #[arg(long, conflicts_with = "at")]
    play: bool,

    /// Print snapshots as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Show final text immediately.
    #[arg(long)]
    skip: bool,

    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    path: PathBuf,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ThemeAction {
    Show,
    Toggle,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Plan(args) => cmd_plan(&cfg, args),
        Command::Frames(args) => cmd_frames(&cfg, args),
        Command::Page(args) => cmd_page(cfg, args),
        Command::Validate(args) => cmd_validate(&args.path),
        Command::Theme { action } => cmd_theme(&cfg, action),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<FolioConfig> {
    let mut cfg = match path {
        Some(p) => {
            FolioConfig::load(p).with_context(|| format!("load config '{}'", p.display()))?
        }
        None => FolioConfig::default(),
    };
    cfg.apply_env();
    cfg.validate()?;
    Ok(cfg)
}

fn with_overrides(
    cfg: &FolioConfig,
    variant: Option<VariantChoice>,
    seed: Option<u64>,
) -> FolioConfig {
    let mut cfg = cfg.clone();
    if let Some(v) = variant {
        cfg.reveal.variant = v.timing();
    }
    if seed.is_some() {
        cfg.seed = seed;
    }
    cfg
}

fn cmd_plan(cfg: &FolioConfig, args: PlanArgs) -> anyhow::Result<()> {
    let cfg = with_overrides(cfg, args.variant, args.seed);
    let pool = cfg.pool()?;
    let mut rng = cfg.rng_for("plan");
    let plan = build_plan(&args.text, cfg.reveal.variant, &pool, &mut rng);
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn cmd_frames(cfg: &FolioConfig, args: FramesArgs) -> anyhow::Result<()> {
    let cfg = with_overrides(cfg, args.variant, args.seed);
    let mut sched = Scheduler::new(cfg.fps()?);
    let mut driver = FrameDriver::new(
        OwnerId(1),
        &args.text,
        cfg.driver_settings()?,
        cfg.rng_for("frames"),
    );

    let mut out = std::io::stdout().lock();
    if driver.start(Millis(args.delay), &mut sched) == Some(DriverEvent::Completed) {
        writeln!(out, "{:>9.1}\t{}", sched.now().as_f64(), args.text)?;
        return Ok(());
    }

    let horizon = Millis(args.delay) + driver.plan().total + sched.frame_interval() + Millis(1.0);
    while let Some(batch) = sched.step(horizon) {
        for w in batch {
            if driver.wake(&w, &mut sched).is_some()
                && let Some(text) = driver.output()
            {
                writeln!(out, "{:>9.1}\t{}", w.at.as_f64(), text)?;
            }
        }
    }
    if !driver.is_complete() {
        anyhow::bail!("reveal did not complete by {horizon}");
    }
    Ok(())
}

fn load_resume(cfg: &FolioConfig, file: Option<&Path>) -> anyhow::Result<ResumeData> {
    if let Some(path) = file {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read resume '{}'", path.display()))?;
        return Ok(ResumeData::from_json_str(&raw)?);
    }
    let remote = cfg
        .resume
        .link
        .as_deref()
        .is_some_and(|l| l.starts_with("http://") || l.starts_with("https://"));
    if remote && !is_curl_on_path() {
        tracing::warn!("curl not found on PATH, remote resume sources will fail");
    }
    let fetch = CachedFetch::new(
        AutoFetch::default(),
        MonotonicClock::new(),
        cfg.resume.cache_ttl_secs,
    );
    let loaded = ResumeLoader::new(cfg.resume.link.clone(), fetch).load();
    tracing::info!(origin = ?loaded.origin, "resume loaded");
    Ok(loaded.data)
}

fn open_theme_store(cfg: &FolioConfig) -> Box<dyn ThemeStore> {
    match cfg.theme_path.clone().or_else(FileThemeStore::default_path) {
        Some(path) => Box::new(FileThemeStore::new(path)),
        None => {
            tracing::warn!("no config directory, theme will not persist");
            Box::new(MemoryThemeStore::default())
        }
    }
}

fn current_theme(cfg: &FolioConfig) -> Theme {
    ThemeController::init(open_theme_store(cfg), system_preference()).theme()
}

fn cmd_page(mut cfg: FolioConfig, args: PageArgs) -> anyhow::Result<()> {
    if args.skip {
        cfg.skip_animation = true;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    let data = load_resume(&cfg, args.resume.as_deref())?;
    let mut page = ProfilePage::mount(&data, &cfg, current_theme(&cfg))?;

    if args.play {
        return play(&mut page);
    }

    let mut out = std::io::stdout().lock();
    if args.at.is_empty() {
        page.run_until_settled(Millis(120_000.0))
            .context("page did not settle within two minutes")?;
        print_page(&mut out, &page, args.json)?;
        return Ok(());
    }

    let mut times = args.at.clone();
    times.sort_by(f64::total_cmp);
    for t in times {
        page.advance_to(Millis(t));
        print_page(&mut out, &page, args.json)?;
    }
    Ok(())
}

fn print_page(
    out: &mut impl std::io::Write,
    page: &ProfilePage,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(&page.snapshot())?)?;
    } else {
        writeln!(out, "--- t={} phase={}", page.now(), page.phase())?;
        write!(out, "{}", page.render_text())?;
    }
    Ok(())
}

fn play(page: &mut ProfilePage) -> anyhow::Result<()> {
    let clock = MonotonicClock::new();
    let tick = std::time::Duration::from_secs_f64(page.scheduler().frame_interval().as_secs());
    let mut out = std::io::stdout().lock();
    loop {
        page.advance_to(clock.now());
        write!(out, "\x1b[2J\x1b[H{}", page.render_text())?;
        out.flush()?;
        if page.is_settled() {
            return Ok(());
        }
        std::thread::sleep(tick);
    }
}

fn cmd_validate(path: &Path) -> anyhow::Result<()> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))?;
    let data = ResumeData::from_json_str(&raw)?;
    let sections = [
        ("links", data.links.items.len()),
        ("skill categories", data.skills.categories.len()),
        ("projects", data.sections.projects.items.len()),
        ("experience", data.sections.experience.items.len()),
        ("education", data.sections.education.items.len()),
    ];
    println!("ok: {}", data.personal_info.name);
    for (name, n) in sections {
        println!("  {name}: {n}");
    }
    Ok(())
}

fn cmd_theme(cfg: &FolioConfig, action: ThemeAction) -> anyhow::Result<()> {
    let mut ctl = ThemeController::init(open_theme_store(cfg), system_preference());
    if let ThemeAction::Toggle = action {
        ctl.toggle();
        if !ctl.is_persisted() {
            eprintln!("warning: theme could not be saved");
        }
    }
    println!("{}", ctl.theme());
    Ok(())
}
