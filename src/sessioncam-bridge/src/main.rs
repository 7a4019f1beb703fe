//! SessionCam bridge shell: drives the mobile bridge from newline-delimited
//! method calls, against a console SDK backend.
//!
//! Each input line is a `{"method": ..., "arguments": ...}` object; each output
//! line is the channel reply for it. A line that is not a method call gets an
//! `invalid_call` reply.

mod console_sdk;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

use sessioncam_core::{ActivityContext, AppContext, BridgeConfig, SdkPlatform};
use sessioncam_mobile_bridge::{
    BridgeAdapter, BridgeChannel, ChannelReply, MethodCall, SessionSdk,
};

use console_sdk::ConsoleSdk;

#[derive(Parser, Debug)]
#[command(name = "sessioncam-bridge")]
#[command(about = "Replay bridge method calls against a console SDK backend")]
#[command(version)]
struct Cli {
    /// File of newline-delimited method calls (defaults to stdin)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Default API endpoint for init calls that omit `apiUrl` (overrides config)
    #[arg(long, env = "SESSIONCAM__DEFAULT_API_URL")]
    api_url: Option<String>,

    /// Foreground activity to wire for `startRecording`
    #[arg(long)]
    activity: Option<String>,

    /// Application identifier reported to the SDK
    #[arg(long, default_value = "com.sessioncam.shell")]
    app_id: String,

    /// Run without an application context (initialize will be rejected)
    #[arg(long, default_value_t = false)]
    no_app_context: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = BridgeConfig::load();
    let filter = loaded
        .as_ref()
        .map(|c| c.log_filter.clone())
        .unwrap_or_else(|_| BridgeConfig::default().log_filter);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        BridgeConfig::default()
    });
    if let Some(api_url) = cli.api_url {
        config.default_api_url = api_url;
    }

    info!(
        default_api_url = %config.default_api_url,
        video = config.enable_video_recording,
        events = config.enable_event_tracking,
        "Configuration loaded"
    );

    let app_context = (!cli.no_app_context).then(|| AppContext {
        platform: SdkPlatform::ReactNative,
        app_id: cli.app_id.clone(),
        app_version: env!("CARGO_PKG_VERSION").to_string(),
    });

    let sdk: Arc<dyn SessionSdk> = Arc::new(ConsoleSdk::new());
    let adapter = BridgeAdapter::new(sdk, app_context).with_defaults(config);
    let mut channel = BridgeChannel::new(adapter);
    if let Some(activity) = cli.activity {
        channel = channel.with_activity(ActivityContext::new(activity));
    }

    let stdout = tokio::io::stdout();
    let handled = match cli.input {
        Some(path) => {
            let file = tokio::fs::File::open(&path).await?;
            run(&channel, BufReader::new(file), stdout).await?
        }
        None => run(&channel, BufReader::new(tokio::io::stdin()), stdout).await?,
    };
    info!(calls = handled, "Input exhausted, shutting down");
    Ok(())
}

/// Dispatch every non-blank input line and write one reply line per call.
/// Returns the number of calls handled.
async fn run<R, W>(channel: &BridgeChannel, reader: R, mut out: W) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0usize;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<MethodCall>(line) {
            Ok(call) => channel.dispatch(call).await,
            Err(e) => {
                error!(error = %e, "Unparseable method call");
                ChannelReply::InvalidCall {
                    message: e.to_string(),
                }
            }
        };
        out.write_all(serde_json::to_string(&reply)?.as_bytes()).await?;
        out.write_all(b"\n").await?;
        handled += 1;
    }

    out.flush().await?;
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn shell_channel() -> BridgeChannel {
        let context = AppContext {
            platform: SdkPlatform::ReactNative,
            app_id: "com.example.shell".into(),
            app_version: "0.1.0".into(),
        };
        let sdk: Arc<dyn SessionSdk> = Arc::new(ConsoleSdk::new());
        BridgeChannel::new(BridgeAdapter::new(sdk, Some(context)))
    }

    #[tokio::test]
    async fn test_run_replies_line_per_call() {
        let input = concat!(
            r#"{"method":"initialize","arguments":{"sdkKey":"key-1"}}"#,
            "\n\n",
            "not json\n",
            r#"{"method":"trackEvent","arguments":{"eventName":"purchase"}}"#,
            "\n",
            r#"{"method":"zoom"}"#,
            "\n",
        );
        let mut out = Vec::new();

        let handled = run(&shell_channel(), BufReader::new(input.as_bytes()), &mut out)
            .await
            .unwrap();
        assert_eq!(handled, 4);

        let replies: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(replies[0], json!({ "status": "success", "value": true }));
        assert_eq!(replies[1]["status"], "invalid_call");
        assert_eq!(replies[2], json!({ "status": "success", "value": true }));
        assert_eq!(
            replies[3],
            json!({ "status": "not_implemented", "method": "zoom" })
        );
    }
}
