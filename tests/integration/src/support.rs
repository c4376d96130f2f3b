//! Shared scaffolding: a local HTTP mirror, an extractor for
//! [`avz_test_utils::archive`] text and a toolchain that checks includes.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use avz_tools::{Extractor, Invocation, ToolOutput, ToolRunner};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves a fixed set of paths over HTTP/1.1 on localhost.
pub struct Mirror {
    pub base: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl Mirror {
    /// Start serving `routes` (path to body). Unknown paths get a 404.
    pub async fn start(routes: HashMap<String, String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let log = Arc::clone(&hits);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }
                    let request = String::from_utf8_lossy(&request);
                    let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                    log.lock().unwrap().push(path.clone());

                    let response = match routes.get(&path) {
                        Some(body) => format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        ),
                        None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                            .to_string(),
                    };
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { base, hits }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Request paths in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

/// Extractor for archive text.
pub struct TextArchiveExtractor;

#[async_trait]
impl Extractor for TextArchiveExtractor {
    async fn extract(&self, archive: &Path, dest: &Path, overwrite: bool) -> avz_tools::Result<()> {
        avz_test_utils::archive::unpack(archive, dest, overwrite).map_err(|stderr| {
            avz_tools::Error::ToolFailed {
                program: "7z".to_string(),
                code: Some(2),
                stderr,
            }
        })
    }
}

/// A compiler that fails when a quoted `#include` is missing from the
/// `-I` directory, and an archiver that writes its output.
#[derive(Default)]
pub struct IncludeCheckingToolchain {
    pub packed: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl ToolRunner for IncludeCheckingToolchain {
    async fn run(&self, invocation: &Invocation) -> avz_tools::Result<ToolOutput> {
        let args = &invocation.args;
        if invocation.display_name() == "ar" {
            std::fs::write(&args[1], "!<arch>\n").unwrap();
            self.packed.lock().unwrap().push(args[2..].to_vec());
            return Ok(success());
        }

        let after = |flag: &str| {
            let i = args.iter().position(|a| a == flag).unwrap();
            PathBuf::from(&args[i + 1])
        };
        let include_dir = after("-I");
        let source = after("-c");
        let object = after("-o");

        let text = std::fs::read_to_string(&source).unwrap();
        for line in text.lines() {
            let Some(header) = line
                .strip_prefix("#include \"")
                .and_then(|rest| rest.strip_suffix('"'))
            else {
                continue;
            };
            if !include_dir.join(header).is_file() {
                return Ok(ToolOutput {
                    code: Some(1),
                    stdout: String::new(),
                    stderr: format!("{}: fatal error: {header}: No such file or directory", source.display()),
                });
            }
        }

        std::fs::write(object, "obj").unwrap();
        Ok(success())
    }
}

fn success() -> ToolOutput {
    ToolOutput {
        code: Some(0),
        ..ToolOutput::default()
    }
}
