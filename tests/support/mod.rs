//! A minimal single-request HTTP stub for exercising the upload client
//! against a real socket without a real backend.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::JoinHandle;

pub struct StubResponse {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl StubResponse {
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type: "application/json",
            body: body.into(),
        }
    }

    pub fn error(status: u16, reason: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            reason,
            content_type: "text/plain",
            body: body.into(),
        }
    }
}

/// What the stub saw: the raw header block and the request body bytes.
pub struct CapturedRequest {
    pub head: String,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Serve exactly one request on an ephemeral port, answering with
/// `response`. Returns the base URL and a handle resolving to the captured
/// request once it has been served.
pub fn serve_once(response: StubResponse) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub listener addr");

    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept stub connection");
        handle_connection(stream, &response)
    });

    (format!("http://{addr}"), handle)
}

fn handle_connection(stream: TcpStream, response: &StubResponse) -> CapturedRequest {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stub stream"));

    let mut head = String::new();
    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).expect("read request head");
        if n == 0 || line == "\r\n" {
            break;
        }
        head.push_str(&line);
    }

    let body = read_body(&head, &mut reader);

    let mut stream = stream;
    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.reason,
        response.content_type,
        response.body.len(),
        response.body
    );
    stream.write_all(payload.as_bytes()).expect("write stub response");
    stream.flush().expect("flush stub response");

    CapturedRequest { head, body }
}

fn read_body(head: &str, reader: &mut impl BufRead) -> Vec<u8> {
    let header = |name: &str| -> Option<String> {
        head.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.eq_ignore_ascii_case(name).then(|| value.trim().to_string())
        })
    };

    if let Some(length) = header("content-length").and_then(|v| v.parse::<usize>().ok()) {
        let mut body = vec![0u8; length];
        reader.read_exact(&mut body).expect("read request body");
        return body;
    }

    if header("transfer-encoding").is_some_and(|v| v.to_ascii_lowercase().contains("chunked")) {
        let mut body = Vec::new();
        loop {
            let mut size_line = String::new();
            reader.read_line(&mut size_line).expect("read chunk size");
            let size =
                usize::from_str_radix(size_line.trim(), 16).expect("parse chunk size");
            if size == 0 {
                let mut trailer = String::new();
                reader.read_line(&mut trailer).expect("read chunk trailer");
                break;
            }
            let mut chunk = vec![0u8; size + 2];
            reader.read_exact(&mut chunk).expect("read chunk");
            chunk.truncate(size);
            body.extend_from_slice(&chunk);
        }
        return body;
    }

    Vec::new()
}
