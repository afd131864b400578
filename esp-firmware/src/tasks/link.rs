// Serial link tasks - framed echo service on the UART
//
// The host-side tooling sends byte-stuffed data frames and measures the
// round trip. The rx task decodes incoming frames and queues replies;
// the tx task encodes and writes them. Splitting the UART keeps the
// receiver draining while a large echo is still going out.
use defmt::{Debug2Format, error, info, warn};
use esp_hal::Async;
use esp_hal::uart::{UartRx, UartTx};
use heapless::Vec;

use esp_core::frame::{self, FrameDecoder, FrameError, FrameKind, MAX_FRAME_LEN, MAX_PAYLOAD_LEN};

use crate::config::{LINK_OVERSIZE_NOTICE, LINK_READ_CHUNK, LINK_READY_NOTICE};
use crate::{LinkFrame, LinkReply, LinkReplyReceiver, LinkReplySender};

/// Link receive task
///
/// Reads the UART in chunks, feeds every byte to the frame decoder and
/// queues one reply per completed data frame. A frame announcing more
/// than `MAX_PAYLOAD_LEN` bytes is answered with the oversize notice so
/// the host tooling can report the failed transfer.
///
/// # Parameters
/// - `rx`: async receive half of the link UART
/// - `replies`: channel sender toward the tx task
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: UartRx<'static, Async>, replies: LinkReplySender) {
    info!("Link: rx task started");

    let mut decoder: FrameDecoder<MAX_PAYLOAD_LEN> = FrameDecoder::new();
    let mut chunk = [0u8; LINK_READ_CHUNK];

    loop {
        let read = match rx.read_async(&mut chunk).await {
            Ok(read) => read,
            Err(e) => {
                warn!("Link: UART read error: {}", Debug2Format(&e));
                // Whatever was in flight is unreliable now
                decoder.reset();
                continue;
            }
        };

        for &byte in &chunk[..read] {
            match decoder.push(byte) {
                Ok(Some(FrameKind::Data)) => {
                    let mut payload = LinkFrame::new();
                    // Same capacity as the decoder, the copy cannot fail
                    let _ = payload.extend_from_slice(decoder.payload());
                    info!("Link: data frame received, {} bytes", payload.len());
                    replies.send(LinkReply::Echo(payload)).await;
                }
                Ok(Some(FrameKind::Notice)) => {
                    // The host never sends notices
                    warn!("Link: unexpected notice frame ignored");
                }
                Ok(None) => {}
                Err(FrameError::PayloadTooLarge) => {
                    warn!("Link: oversized frame rejected");
                    replies.send(LinkReply::Notice(LINK_OVERSIZE_NOTICE)).await;
                }
                Err(e) => {
                    warn!("Link: frame error: {}", e);
                }
            }
        }
    }
}

/// Link transmit task
///
/// Writes the boot banner first - the host discards everything it reads
/// before that notice - then encodes and sends every queued reply.
///
/// # Parameters
/// - `tx`: async transmit half of the link UART
/// - `replies`: channel receiver fed by the rx task
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: UartTx<'static, Async>, replies: LinkReplyReceiver) {
    info!("Link: tx task started");

    // Worst-case stuffed frame; lives in the task arena, not the stack
    let mut encoded: Vec<u8, MAX_FRAME_LEN> = Vec::new();

    send_notice(&mut tx, LINK_READY_NOTICE, &mut encoded).await;

    loop {
        match replies.receive().await {
            LinkReply::Echo(payload) => {
                if let Err(e) = frame::encode_frame(&payload, &mut encoded) {
                    error!("Link: encode failed: {}", e);
                    continue;
                }
                write_all(&mut tx, &encoded).await;
                info!("Link: echoed {} bytes", payload.len());
            }
            LinkReply::Notice(text) => {
                send_notice(&mut tx, text, &mut encoded).await;
            }
        }
    }
}

/// Encodes and writes one notice frame
async fn send_notice(
    tx: &mut UartTx<'static, Async>,
    text: &str,
    encoded: &mut Vec<u8, MAX_FRAME_LEN>,
) {
    if let Err(e) = frame::encode_notice(text, encoded) {
        error!("Link: notice encode failed: {}", e);
        return;
    }
    write_all(tx, encoded).await;
}

/// Writes a whole buffer, following up on partial writes
async fn write_all(tx: &mut UartTx<'static, Async>, mut bytes: &[u8]) {
    while !bytes.is_empty() {
        match tx.write_async(bytes).await {
            Ok(written) => bytes = &bytes[written..],
            Err(e) => {
                warn!("Link: UART write error: {}", Debug2Format(&e));
                return;
            }
        }
    }
    if let Err(e) = tx.flush_async().await {
        warn!("Link: UART flush error: {}", Debug2Format(&e));
    }
}
