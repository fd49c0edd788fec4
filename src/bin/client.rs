//! Interactive chat client
//!
//! Connects to the chat server, registers the username, then mirrors server
//! lines to stdout while forwarding stdin lines to the server. The process
//! ends when either stream direction ends.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

/// Single-room chat client
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct ClientArgs {
    /// Host address of the chat server
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port of the chat server
    #[arg(long, default_value_t = 9000)]
    port: u16,

    /// Username to register with; prompted for when omitted
    #[arg(long)]
    user: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ClientArgs::parse();

    let mut stdin_lines = BufReader::new(tokio::io::stdin()).lines();

    let username = match args.user {
        Some(user) => user,
        None => prompt_username(&mut stdin_lines).await?,
    };
    let username = username.trim().to_string();

    let stream = TcpStream::connect((args.host.as_str(), args.port)).await?;
    println!("Connected to {}:{}", args.host, args.port);

    let (read_half, mut write_half) = stream.into_split();
    let mut server_lines = BufReader::new(read_half).lines();

    // Registration: the first line sent is the username
    write_line(&mut write_half, &username).await?;

    loop {
        tokio::select! {
            line = server_lines.next_line() => match line? {
                Some(line) => println!("{line}"),
                None => {
                    println!("Connection closed by server");
                    break;
                }
            },
            input = stdin_lines.next_line() => match input? {
                Some(input) => write_line(&mut write_half, &input).await?,
                None => break,
            },
        }
    }

    Ok(())
}

/// Ask for a username on stdout and read one line from stdin
async fn prompt_username(
    stdin_lines: &mut tokio::io::Lines<BufReader<tokio::io::Stdin>>,
) -> std::io::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Enter your username: ").await?;
    stdout.flush().await?;
    Ok(stdin_lines.next_line().await?.unwrap_or_default())
}

/// Write one line plus the newline delimiter
async fn write_line<W>(writer: &mut W, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}
