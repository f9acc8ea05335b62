use anyhow::Context;
use clap::Parser;
use storefront_cart::app::{open_cart, render_cart, run_command};
use storefront_cart::domain::ports::ConfigProvider;
use storefront_cart::utils::{logger, validation::Validate};
use storefront_cart::{CartError, CliConfig, ConsoleNotifier, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置
    let mut toml = match &cli.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?,
        ),
        None => None,
    };

    // 初始化日誌
    let verbose = cli.verbose || toml.as_ref().is_some_and(TomlConfig::verbose);
    if cli.json_logs || toml.as_ref().is_some_and(TomlConfig::json_logs) {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting storefront cart CLI");

    // 應用命令列覆蓋設定
    if let Some(toml) = toml.as_mut() {
        cli.apply_overrides(toml);
    }
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    let provider: &dyn ConfigProvider = match &toml {
        Some(toml) => toml,
        None => &cli,
    };
    let validation = match &toml {
        Some(toml) => toml.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validation {
        exit_with(&e);
    }

    let mut manager = match open_cart(provider, ConsoleNotifier).await {
        Ok(manager) => manager,
        Err(e) => exit_with(&e),
    };

    let outcome = run_command(&mut manager, &cli.command).await;
    println!("{}", render_cart(manager.cart()));

    if let Err(failure) = outcome {
        // the notifier already told the user; the exit code tells scripts
        tracing::debug!("Command did not apply: {}", failure);
        std::process::exit(failure.exit_code());
    }

    Ok(())
}

fn exit_with(e: &CartError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
