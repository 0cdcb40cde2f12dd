//! Static file server for the marketplace front-end
//!
//! Serves the built WASM bundle from the dist/ directory on port 8080,
//! with an SPA fallback to index.html for client-side routes.

use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};

const ADDR: &str = "127.0.0.1:8080";
const DIST: &str = "dist";

fn main() {
    let listener = TcpListener::bind(ADDR).expect("Failed to bind to port 8080");

    println!("Marketplace dev server running at http://{}", ADDR);
    println!("Serving from {}/ directory", DIST);
    println!("Press Ctrl+C to stop\n");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                if let Err(err) = handle_client(stream) {
                    eprintln!("Request error: {}", err);
                }
            }
            Err(err) => eprintln!("Connection error: {}", err),
        }
    }
}

fn handle_client(mut stream: TcpStream) -> io::Result<()> {
    let request_line = match BufReader::new(&mut stream).lines().next() {
        Some(line) => line?,
        None => return Ok(()),
    };

    let full_path = request_line.split_whitespace().nth(1).unwrap_or("/");
    let path = full_path.split('?').next().unwrap_or(full_path);

    let file_path = resolve(path);
    let (status, body, content_type) = match fs::read(&file_path) {
        Ok(body) => ("200 OK", body, content_type(&file_path)),
        Err(_) => (
            "404 NOT FOUND",
            b"<!DOCTYPE html><html><body><h1>Not found</h1></body></html>".to_vec(),
            "text/html; charset=utf-8",
        ),
    };

    let headers = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nAccess-Control-Allow-Origin: *\r\nContent-Length: {}\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    stream.write_all(headers.as_bytes())?;
    stream.write_all(&body)?;
    stream.flush()
}

/// Map a request path onto dist/, falling back to index.html for anything
/// that is not an existing file (client-side routing).
fn resolve(path: &str) -> PathBuf {
    let index = Path::new(DIST).join("index.html");
    if path == "/" || path.is_empty() {
        return index;
    }

    let candidate = Path::new(DIST).join(path.trim_start_matches('/'));
    if candidate.is_file() {
        candidate
    } else {
        index
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
