// ==========================================
// 配合比导入转换器 - 命令行入口
// ==========================================
// 用法:
//   mix-import-converter convert --system MPAQ --entity mixes --input mixes.xlsx \
//       --materials materials.xlsx --output out.xlsx
//   mix-import-converter list
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mix_import_converter::{
    logging, ConfigManager, ConversionApi, ConversionRequest, ConversionService, DispatchSystem,
    EntityType, TransformProgram, APP_NAME, VERSION,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mix-import-converter")]
#[command(version, about = "Convert dispatch-system mix exports into import workbooks")]
struct Cli {
    /// Runtime config file (default: <config dir>/mix-import-converter/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one export file
    Convert {
        /// Source dispatch system (e.g. "MPAQ", "Command Series")
        #[arg(short, long)]
        system: DispatchSystem,

        /// Entity type ("mixes" or "materials")
        #[arg(short, long)]
        entity: EntityType,

        /// Primary export file (.xlsx/.xls/.xlsm/.ods/.csv)
        #[arg(short, long)]
        input: PathBuf,

        /// Materials import table used to resolve item codes; may repeat
        #[arg(short, long = "materials")]
        materials: Vec<PathBuf>,

        /// Output file (.xlsx or .csv); defaults to the configured output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON transform program applied after conversion
        #[arg(short, long)]
        transform: Option<PathBuf>,
    },

    /// List implemented system/entity pairs
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    logging::init(&config.log_filter);

    tracing::info!("==================================================");
    tracing::info!("{} v{}", APP_NAME, VERSION);
    tracing::info!("==================================================");

    let api = ConversionApi::new(config);

    match cli.command {
        Command::List => {
            for system in DispatchSystem::ALL {
                for entity in [EntityType::Mixes, EntityType::Materials] {
                    let status = if api.registry().is_implemented(system, entity) {
                        "implemented"
                    } else {
                        "not implemented"
                    };
                    println!("{:<16} {:<10} {}", system.to_string(), entity.to_string(), status);
                }
            }
        }
        Command::Convert {
            system,
            entity,
            input,
            materials,
            output,
            transform,
        } => {
            let mut request = ConversionRequest::new(system, entity, input);
            request.auxiliary_paths = materials;
            request.output_path = output;

            if let Some(path) = transform {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("读取变换程序失败: {}", path.display()))?;
                request.transform = Some(TransformProgram::from_json(&json)?);
            }

            let response = api.convert_files(request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
