//! 統合テスト共通ヘルパー

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// 3行の名所データ（完全な行・座標なし・座標のみ）
pub const THREE_ROW_CSV: &str = "\
Название,Страна,Тип,Год постройки,Высота/размер,Краткое описание,Мифы/легенды/известные люди,Координаты,Фото,Визовый режим (для граждан Украины)
Эйфелева башня,Франция,Башня,1889,330 м,Символ Парижа,Гюстав Эйфель,\"48.8584,2.2945\",https://images.example/eiffel,Безвиз
Нигде,Атлантида,Остров,,,,,,,
,,,,,,,\"10,20\",,
";

pub fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("CSV書き込み失敗");
    path
}

/// 1回だけ応答するHTTPスタブ。ベースURL（`http://127.0.0.1:port`）を返す
pub async fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind失敗");
    let addr = listener.local_addr().expect("アドレス取得失敗");

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = vec![0u8; 4096];
            let mut request = Vec::new();
            while let Ok(n) = socket.read(&mut buf).await {
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}", addr)
}

/// 何も待ち受けていないポートのベースURL（接続は拒否される）
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind失敗");
    let addr = listener.local_addr().expect("アドレス取得失敗");
    drop(listener);
    format!("http://{}", addr)
}
