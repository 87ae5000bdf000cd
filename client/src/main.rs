use std::env;

use futures_util::StreamExt;
use rect_client::{LogRecord, RectClient, parse_matrix, random_matrix};
use rect_finder::Finding;

fn print_finding(finding: &Finding) {
    let values: Vec<String> = finding.values.iter().map(|v| v.to_string()).collect();
    println!("Values: {{{}}}", values.join(", "));
    println!("Area: {}", finding.area);
}

fn print_log(log: &LogRecord) {
    println!(
        "#{} [{}] {:.3} ms\n  request:  {}\n  response: {}",
        log.id, log.timestamp, log.execution_time_ms, log.request_data, log.response_data
    );
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <addr> <mode> [args...]", program);
    eprintln!("Modes:");
    eprintln!("  ping                            - Check that the server is up");
    eprintln!("  find <json>                     - Search a matrix, e.g. '[[1,1],[2,2]]'");
    eprintln!("  random <rows> <cols> <alphabet> - Search a random matrix");
    eprintln!("  logs [after_id]                 - Print stored request logs");
    eprintln!("  tail [after_id]                 - Follow request logs as they arrive");
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("rect-client", String::as_str);

    let addr = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "localhost:50051".to_string());
    let mode = args.get(2).cloned().unwrap_or_else(|| "ping".to_string());
    let arg = |i: usize, default: &str| args.get(i).cloned().unwrap_or_else(|| default.to_string());

    let mut client = RectClient::connect(addr.clone()).await?;

    match mode.as_str() {
        "ping" => {
            let message = client.ping().await?;
            println!("{}: {}", addr, message);
        }
        "find" => {
            let Some(json) = args.get(3) else {
                usage(program);
            };
            let matrix = parse_matrix(json)?;
            let finding = client.largest_rectangle(&matrix).await?;
            print_finding(&finding);
        }
        "random" => {
            let rows: usize = arg(3, "4").parse()?;
            let cols: usize = arg(4, "4").parse()?;
            let alphabet: i64 = arg(5, "3").parse()?;

            let matrix = random_matrix(&mut rand::thread_rng(), rows, cols, alphabet)?;
            println!("Matrix ({}x{}):", rows, cols);
            for row in matrix.rows() {
                println!("  {:?}", row);
            }
            let finding = client.largest_rectangle(&matrix).await?;
            print_finding(&finding);
        }
        "logs" => {
            let after_id: i64 = arg(3, "0").parse()?;
            let logs = client.logs(after_id).await?;
            for log in &logs {
                print_log(log);
            }
            println!("{} log entries", logs.len());
        }
        "tail" => {
            let after_id: i64 = arg(3, "0").parse()?;
            let mut stream = client.follow_logs(after_id).await?;
            while let Some(log) = stream.next().await {
                print_log(&log?);
            }
        }
        _ => {
            eprintln!("Unknown mode: {}", mode);
            usage(program);
        }
    }

    Ok(())
}
