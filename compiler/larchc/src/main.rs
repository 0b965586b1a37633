//! Larch driver CLI.
//!
//! `larch run` lexes on one thread and parses on another through the
//! batched token channel, builds the tree with the chosen storage policy,
//! and evaluates it. With no arguments it drops into the REPL.

use tracing::debug;

use larch_eval::{Interpreter, Stdout};
use larch_ir::visit::printer::render_unit;
use larch_ir::{
    ArenaBuilder, Boxed, BoxedBuilder, DedupBuilder, Indexed, NodeBuilder, Policy, Shared,
    SharedBuilder, StringInterner, TranslationUnit,
};

mod pipeline;
mod repl;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum PolicyChoice {
    Boxed,
    Shared,
    Arena,
    Dedup,
}

impl PolicyChoice {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "boxed" => Some(PolicyChoice::Boxed),
            "shared" => Some(PolicyChoice::Shared),
            "arena" => Some(PolicyChoice::Arena),
            "dedup" => Some(PolicyChoice::Dedup),
            _ => None,
        }
    }
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        std::process::exit(repl::run());
    }

    match args[1].as_str() {
        "run" => {
            let (path, policy, print_ast) = parse_run_args(&args[2..]);
            std::process::exit(run_file(&path, policy, print_ast));
        }
        "parse" => {
            let (path, policy, _) = parse_run_args(&args[2..]);
            std::process::exit(parse_file(&path, policy));
        }
        "repl" => {
            std::process::exit(repl::run());
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("larch {}", env!("CARGO_PKG_VERSION"));
        }
        command => {
            // A bare file path means run it.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("larch"))
            {
                std::process::exit(run_file(command, PolicyChoice::Boxed, false));
            }
            eprintln!("unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(64);
        }
    }
}

fn parse_run_args(args: &[String]) -> (String, PolicyChoice, bool) {
    let mut path = None;
    let mut policy = PolicyChoice::Boxed;
    let mut print_ast = false;

    for arg in args {
        if let Some(name) = arg.strip_prefix("--policy=") {
            let Some(choice) = PolicyChoice::parse(name) else {
                eprintln!("error: unknown policy '{name}'");
                eprintln!("Valid policies: boxed, shared, arena, dedup");
                std::process::exit(64);
            };
            policy = choice;
        } else if arg == "--print-ast" {
            print_ast = true;
        } else if !arg.starts_with('-') && path.is_none() {
            path = Some(arg.clone());
        }
    }

    let Some(path) = path else {
        eprintln!("error: missing file path");
        eprintln!("Usage: larch run <file.larch> [--policy=<name>] [--print-ast]");
        std::process::exit(64);
    };
    (path, policy, print_ast)
}

fn read_source(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {path}: {err}");
            std::process::exit(66);
        }
    }
}

fn run_file(path: &str, policy: PolicyChoice, print_ast: bool) -> i32 {
    let source = read_source(path);
    let interner = StringInterner::new();
    match policy {
        PolicyChoice::Boxed => {
            let Some(out) = front_end(&source, &interner, BoxedBuilder::new()) else {
                return 65;
            };
            maybe_print::<Boxed>(&out.unit, (), &interner, print_ast);
            evaluate::<Boxed>(&out.unit, (), &interner)
        }
        PolicyChoice::Shared => {
            let Some(out) = front_end(&source, &interner, SharedBuilder::new()) else {
                return 65;
            };
            maybe_print::<Shared>(&out.unit, (), &interner, print_ast);
            evaluate::<Shared>(&out.unit, (), &interner)
        }
        PolicyChoice::Arena => {
            let Some(out) = front_end(&source, &interner, ArenaBuilder::new()) else {
                return 65;
            };
            maybe_print::<Indexed>(&out.unit, out.builder.arena(), &interner, print_ast);
            evaluate::<Indexed>(&out.unit, out.builder.arena(), &interner)
        }
        PolicyChoice::Dedup => {
            let Some(out) = front_end(&source, &interner, DedupBuilder::new()) else {
                return 65;
            };
            debug!(
                hits = out.builder.dedup_hits(),
                exprs = out.builder.arena().expr_count(),
                stmts = out.builder.arena().stmt_count(),
                "deduplicated arena"
            );
            maybe_print::<Indexed<_>>(&out.unit, out.builder.arena(), &interner, print_ast);
            evaluate::<Indexed<_>>(&out.unit, out.builder.arena(), &interner)
        }
    }
}

fn parse_file(path: &str, policy: PolicyChoice) -> i32 {
    let source = read_source(path);
    let interner = StringInterner::new();
    match policy {
        PolicyChoice::Boxed => {
            let Some(out) = front_end(&source, &interner, BoxedBuilder::new()) else {
                return 65;
            };
            print!("{}", render_unit::<Boxed>(&out.unit, (), &interner));
        }
        PolicyChoice::Shared => {
            let Some(out) = front_end(&source, &interner, SharedBuilder::new()) else {
                return 65;
            };
            print!("{}", render_unit::<Shared>(&out.unit, (), &interner));
        }
        PolicyChoice::Arena => {
            let Some(out) = front_end(&source, &interner, ArenaBuilder::new()) else {
                return 65;
            };
            print!(
                "{}",
                render_unit::<Indexed>(&out.unit, out.builder.arena(), &interner)
            );
        }
        PolicyChoice::Dedup => {
            let Some(out) = front_end(&source, &interner, DedupBuilder::new()) else {
                return 65;
            };
            print!(
                "{}",
                render_unit::<Indexed<_>>(&out.unit, out.builder.arena(), &interner)
            );
            println!(
                "// {} expression nodes, {} statement nodes, {} dedup hits",
                out.builder.arena().expr_count(),
                out.builder.arena().stmt_count(),
                out.builder.dedup_hits()
            );
        }
    }
    0
}

/// Run the threaded front end and report its diagnostics. `None` means the
/// source did not parse cleanly.
fn front_end<B: NodeBuilder>(
    source: &str,
    interner: &StringInterner,
    builder: B,
) -> Option<pipeline::FrontEndOutput<B>> {
    let out = pipeline::parse_threaded(source, interner, builder);
    for err in &out.lex_errors {
        eprintln!("{err}");
    }
    for err in &out.parse_errors {
        eprintln!("{err}");
    }
    if out.lex_errors.is_empty() && out.parse_errors.is_empty() {
        Some(out)
    } else {
        None
    }
}

fn maybe_print<'t, P: Policy>(
    unit: &'t TranslationUnit<P>,
    cx: P::Resolver<'t>,
    interner: &StringInterner,
    print_ast: bool,
) {
    if print_ast {
        print!("{}", render_unit::<P>(unit, cx, interner));
    }
}

fn evaluate<'t, P: Policy>(
    unit: &'t TranslationUnit<P>,
    cx: P::Resolver<'t>,
    interner: &'t StringInterner,
) -> i32 {
    let mut interp = Interpreter::new(interner, Stdout);
    match interp.run(unit, cx) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("runtime error: {err}");
            70
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("LARCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_usage() {
    println!("Larch front-end kit");
    println!();
    println!("Usage: larch <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.larch>     Parse and evaluate a program");
    println!("  parse <file.larch>   Parse and display the tree");
    println!("  repl                 Interactive mode (also the default)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --policy=<name>     Tree storage policy: boxed (default), shared, arena, dedup");
    println!("  --print-ast         Print the tree before running it");
    println!();
    println!("Environment:");
    println!("  LARCH_LOG           Tracing filter, e.g. debug or larch_parse=trace");
}
