use std::time::Duration;

use anyhow::{anyhow, bail};
use clap::Parser;
use clap_derive::{Parser, Subcommand};
use telemetry_link::encoding::{decode_metadata, decode_position, encode_metadata, encode_position, EncodedBuffer, GlobalPosition, WorkerTag, METADATA_ENCODED_LEN, POSITION_ENCODED_LEN};
use telemetry_link::network::{NetworkConfig, TcpClientSocket, TcpServerSocket, UdpClientSocket, UdpServerSocket};
use tracing::{info, warn, Level};

#[derive(Parser)]
struct Args {
    #[clap(subcommand)]
    command: Command,

    /// use TCP instead of UDP
    #[clap(long, default_value_t = false)]
    tcp: bool,

    #[clap(long, default_value_t = 60)]
    timeout_secs: u64,

    #[clap(long, default_value_t = 32 * 1024)]
    chunk_size: usize,

    #[clap(short, long, default_value_t = false)]
    verbose: bool,

    #[clap(long, default_value_t = false)]
    very_verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// send a metadata record followed by a track of position records
    Send {
        host: String,
        port: u16,

        #[clap(long, default_value_t = 6)]
        worker: u8,

        #[clap(long, default_value_t = 10)]
        count: i32,
    },
    /// receive and print one metadata record and the position records it announces
    Receive {
        /// interface to listen on, all interfaces if empty
        #[clap(long, default_value = "")]
        host: String,
        port: u16,
    },
}

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match (args.verbose, args.very_verbose) {
        (_, true) => Level::TRACE,
        (true, _) => Level::DEBUG,
        (false, false) => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .try_init()
        .ok();

    let config = NetworkConfig {
        connection_timeout: Duration::from_secs(args.timeout_secs),
        chunk_size: args.chunk_size,
        ..Default::default()
    };
    config.validate()?;

    match args.command {
        Command::Send { host, port, worker, count } => {
            if count < 0 {
                bail!("count must not be negative");
            }
            let worker = WorkerTag::from_id(worker)?;
            let records = build_records(worker, count)?;

            if args.tcp {
                let mut socket = TcpClientSocket::connect(&host, port, &config).await?;
                for record in &records {
                    socket.send(record.as_bytes()).await?;
                }
                socket.close().await?;
            }
            else {
                let socket = UdpClientSocket::create(&host, port, &config).await?;
                for record in &records {
                    socket.send(record.as_bytes()).await?;
                }
            }
            info!("sent {} records for {}", records.len(), worker);
        }
        Command::Receive { host, port } => {
            if args.tcp {
                let server = TcpServerSocket::create(&host, port, &config).await?;
                let mut socket = server.accept().await?;

                let metadata = decode_metadata(&socket.recv(METADATA_ENCODED_LEN).await?)?;
                info!("{} announced {} positions", metadata.worker, metadata.message_count);
                for _ in 0..metadata.message_count {
                    log_position(&socket.recv(POSITION_ENCODED_LEN).await?);
                }
                socket.close().await?;
            }
            else {
                let mut socket = UdpServerSocket::create(&host, port, &config).await?;

                let metadata = decode_metadata(&socket.recv(METADATA_ENCODED_LEN).await?)?;
                info!("{} announced {} positions", metadata.worker, metadata.message_count);
                for _ in 0..metadata.message_count {
                    log_position(&socket.recv(POSITION_ENCODED_LEN).await?);
                }
            }
        }
    }
    Ok(())
}

/// A metadata record announcing `count` positions, followed by the positions along a short
///  northbound track
fn build_records(worker: WorkerTag, count: i32) -> anyhow::Result<Vec<EncodedBuffer>> {
    let mut records = vec![encode_metadata(worker, count)];
    for i in 0..count {
        let position = GlobalPosition::new(43.4723 + 0.0001 * i as f64, -80.5449, 336.0);
        records.push(encode_position(worker, position)
            .map_err(|e| anyhow!("could not encode position {}: {}", i, e))?);
    }
    Ok(records)
}

fn log_position(buf: &[u8]) {
    match decode_position(buf) {
        Ok(record) => info!("{}: lat {} lon {} alt {}", record.worker, record.position.latitude, record.position.longitude, record.position.altitude),
        Err(e) => warn!("discarding corrupt position record: {}", e),
    }
}
