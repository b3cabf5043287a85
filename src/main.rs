use clap::Parser;
use incident_etl::domain::ports::ConfigProvider;
use incident_etl::utils::error::ErrorSeverity;
use incident_etl::utils::{logger, validation::Validate};
use incident_etl::{CliConfig, EtlEngine, IncidentPipeline, LocalStorage, TomlConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting incident-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // TOML 配置優先於命令列旗標
    if let Some(path) = cli.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        let config = match TomlConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(2);
            }
        };

        let monitor_enabled = cli.monitor || config.monitoring_enabled();
        run_with(config, monitor_enabled).await;
    } else {
        let monitor_enabled = cli.monitor;
        run_with(cli, monitor_enabled).await;
    }

    Ok(())
}

async fn run_with<C>(config: C, monitor_enabled: bool)
where
    C: ConfigProvider + Validate + 'static,
{
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(2);
    }

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道
    let storage = LocalStorage::default();
    let pipeline = IncidentPipeline::new(storage, config);

    // 創建ETL引擎並運行
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ ETL process completed successfully!");
            println!("\nTransformation complete!");
            println!("📁 Cloud-ready data saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼；缺少輸入檔視為正常結束
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
