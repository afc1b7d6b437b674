//! watchbench — OpenStack Watcher 벤치마크 CLI 진입점
//!
//! 인자 파싱, 로깅 초기화, 서브커맨드 디스패치만 담당합니다.
//! 실제 동작은 `commands` 모듈의 핸들러에 있습니다.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use watchbench_core::config::WatchbenchConfig;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 로깅 설정은 설정 파일의 [general]에서 가져오되, 파일이 없으면
    // 기본값을 쓴다 (config validate는 파일 없이도 돌아야 한다).
    let mut general = WatchbenchConfig::from_file(&cli.config)
        .await
        .map(|config| config.general)
        .unwrap_or_default();
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("error: {e}");
        std::process::exit(2);
    }

    tracing::debug!(config = %cli.config.display(), "watchbench starting");

    let writer = OutputWriter::new(cli.output);
    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args, &cli.config, &writer).await,
        Commands::List(args) => commands::list::execute(args, &cli.config, &writer).await,
        Commands::Templates(args) => {
            commands::templates::execute(args, &cli.config, &writer).await
        }
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}
