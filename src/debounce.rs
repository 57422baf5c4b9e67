//! 入力の間引き
//!
//! 連続した入力は最後の値だけを、入力が `quiet` の間止まってから適用する。
//! 送信側が閉じたときに保留中の値があればそれを適用して終わる。

use std::time::Duration;
use tokio::sync::mpsc::Receiver;
use tokio::time::{sleep_until, Instant};

pub async fn debounce<T, F>(mut rx: Receiver<T>, quiet: Duration, mut apply: F)
where
    F: FnMut(T),
{
    let mut pending: Option<(T, Instant)> = None;

    loop {
        match pending.take() {
            None => match rx.recv().await {
                Some(value) => pending = Some((value, Instant::now() + quiet)),
                None => return,
            },
            Some((value, deadline)) => {
                tokio::select! {
                    received = rx.recv() => match received {
                        Some(next) => pending = Some((next, Instant::now() + quiet)),
                        None => {
                            apply(value);
                            return;
                        }
                    },
                    _ = sleep_until(deadline) => apply(value),
                }
            }
        }
    }
}
