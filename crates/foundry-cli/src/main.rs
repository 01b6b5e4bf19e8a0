use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod arguments;
mod call_cmd;
mod rpc;
mod stream_cmd;
mod tools_cmd;

#[derive(Parser)]
#[command(name = "foundry", about = "Client for the design foundry MCP server")]
struct Cli {
    /// Server URL
    #[arg(long, env = "FOUNDRY_URL", default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tools the server exposes
    Tools,

    /// Call a tool and print its answer
    Call(CallArgs),

    /// Call a tool over an SSE session and print its answer
    Stream(CallArgs),
}

#[derive(Args)]
struct CallArgs {
    /// Tool name
    tool: String,

    /// Tool argument as KEY=VALUE; VALUE is read as JSON if it parses
    #[arg(long = "arg", value_name = "KEY=VALUE")]
    args: Vec<String>,

    /// All arguments as one JSON object; --arg entries override its keys
    #[arg(long)]
    json: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let url = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Tools => tools_cmd::run(url).await?,
        Commands::Call(call) => {
            let arguments = arguments::parse(&call.args, call.json.as_deref())?;
            call_cmd::run(url, &call.tool, arguments).await?;
        }
        Commands::Stream(call) => {
            let arguments = arguments::parse(&call.args, call.json.as_deref())?;
            stream_cmd::run(url, &call.tool, arguments).await?;
        }
    }

    Ok(())
}
