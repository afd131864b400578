//! Serial frame codec
//!
//! Byte-stuffed, length-prefixed framing for the UART link. The host side
//! of this protocol drives round-trip speed tests against the device.
//!
//! Wire format of a data frame:
//!
//! ```text
//! START_MARKER | len_hi | len_lo | stuffed payload | END_MARKER
//! ```
//!
//! The big-endian length field counts the payload plus the two length
//! bytes themselves, so an empty payload carries the field value 2 and the
//! largest payload carries 8191. The length bytes go over the wire raw and
//! may collide with marker values; the decoder consumes them positionally.
//!
//! Any payload byte >= `SPECIAL_BYTE` is stuffed as the pair
//! (`SPECIAL_BYTE`, byte - `SPECIAL_BYTE`), so the markers never appear
//! inside a stuffed payload.
//!
//! A length field of 0 introduces a notice frame: stuffed UTF-8 text
//! terminated by `END_MARKER`, used for the boot banner and error
//! reporting toward the host.

use heapless::Vec;

/// Opens every frame
pub const START_MARKER: u8 = 254;

/// Closes every frame
pub const END_MARKER: u8 = 255;

/// Escape byte; introduces a stuffed pair inside a payload
pub const SPECIAL_BYTE: u8 = 253;

/// Largest accepted payload of a data frame
///
/// The length field tops out at 8191 and includes its own two bytes.
pub const MAX_PAYLOAD_LEN: usize = 8189;

/// Worst-case encoded size of a maximum payload (every byte stuffed)
pub const MAX_FRAME_LEN: usize = 4 + 2 * MAX_PAYLOAD_LEN;

/// Error type for encoding and decoding frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Data payload larger than `MAX_PAYLOAD_LEN`
    PayloadTooLarge,
    /// Frame ended (or restarted) before the announced payload arrived
    Truncated,
    /// Length field below 2, stuffed pair out of range, or bad trailer byte
    Malformed,
    /// Output or decoder buffer too small for the frame
    Overflow,
}

/// Kind of a completely received frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Binary payload announced by a non-zero length field
    Data,
    /// Length field 0; payload is UTF-8 text
    Notice,
}

fn push_stuffed<const CAP: usize>(out: &mut Vec<u8, CAP>, byte: u8) -> Result<(), FrameError> {
    if byte >= SPECIAL_BYTE {
        out.push(SPECIAL_BYTE).map_err(|_| FrameError::Overflow)?;
        out.push(byte - SPECIAL_BYTE)
            .map_err(|_| FrameError::Overflow)
    } else {
        out.push(byte).map_err(|_| FrameError::Overflow)
    }
}

/// Encodes a data frame into `out` (cleared first)
///
/// # Errors
/// `PayloadTooLarge` for payloads over `MAX_PAYLOAD_LEN`, `Overflow` when
/// `out` cannot hold the stuffed frame.
pub fn encode_frame<const CAP: usize>(
    payload: &[u8],
    out: &mut Vec<u8, CAP>,
) -> Result<(), FrameError> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(FrameError::PayloadTooLarge);
    }

    out.clear();
    out.push(START_MARKER).map_err(|_| FrameError::Overflow)?;

    // Length field counts the payload plus its own two bytes
    let field = (payload.len() as u16) + 2;
    out.extend_from_slice(&field.to_be_bytes())
        .map_err(|_| FrameError::Overflow)?;

    for &byte in payload {
        push_stuffed(out, byte)?;
    }

    out.push(END_MARKER).map_err(|_| FrameError::Overflow)
}

/// Encodes a notice frame carrying human-readable text into `out`
pub fn encode_notice<const CAP: usize>(
    text: &str,
    out: &mut Vec<u8, CAP>,
) -> Result<(), FrameError> {
    out.clear();
    out.push(START_MARKER).map_err(|_| FrameError::Overflow)?;
    out.extend_from_slice(&0u16.to_be_bytes())
        .map_err(|_| FrameError::Overflow)?;

    for &byte in text.as_bytes() {
        push_stuffed(out, byte)?;
    }

    out.push(END_MARKER).map_err(|_| FrameError::Overflow)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between frames; everything except a start marker is noise
    Idle,
    /// Expecting the high length byte
    LenHigh,
    /// Expecting the low length byte
    LenLow(u8),
    /// Collecting the announced number of payload bytes
    Data,
    /// Collecting notice text until the end marker
    Notice,
    /// Payload complete; expecting the end marker
    Trailer,
}

/// Push-based frame decoder
///
/// Feed received bytes one at a time; a returned `FrameKind` signals a
/// complete frame whose unstuffed payload is available via [`payload`]
/// until the next byte is pushed.
///
/// Noise between frames is ignored. After an error the decoder drops the
/// broken frame and resynchronizes: a start marker in the offending byte
/// already opens the next frame.
///
/// [`payload`]: FrameDecoder::payload
pub struct FrameDecoder<const CAP: usize> {
    state: State,
    escape: bool,
    expected: usize,
    payload: Vec<u8, CAP>,
}

impl<const CAP: usize> Default for FrameDecoder<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> FrameDecoder<CAP> {
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            escape: false,
            expected: 0,
            payload: Vec::new(),
        }
    }

    /// Unstuffed payload of the last completed frame
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Drops any partial frame and returns to the idle state
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.escape = false;
        self.expected = 0;
        self.payload.clear();
    }

    /// Consumes one received byte
    ///
    /// Returns `Ok(Some(kind))` when `byte` completes a frame, `Ok(None)`
    /// while a frame is in flight (or between frames).
    ///
    /// # Errors
    /// See [`FrameError`]; the broken frame is discarded and the decoder
    /// is ready for the next one.
    pub fn push(&mut self, byte: u8) -> Result<Option<FrameKind>, FrameError> {
        match self.state {
            State::Idle => {
                if byte == START_MARKER {
                    self.payload.clear();
                    self.state = State::LenHigh;
                }
                Ok(None)
            }
            State::LenHigh => {
                self.state = State::LenLow(byte);
                Ok(None)
            }
            State::LenLow(hi) => {
                let field = u16::from_be_bytes([hi, byte]) as usize;
                if field == 0 {
                    self.state = State::Notice;
                    return Ok(None);
                }
                if field < 2 {
                    return Err(self.fail(byte, FrameError::Malformed));
                }
                let len = field - 2;
                if len > MAX_PAYLOAD_LEN {
                    return Err(self.fail(byte, FrameError::PayloadTooLarge));
                }
                if len > CAP {
                    return Err(self.fail(byte, FrameError::Overflow));
                }
                self.expected = len;
                self.state = if len == 0 { State::Trailer } else { State::Data };
                Ok(None)
            }
            State::Data => {
                let decoded = match self.unstuff(byte)? {
                    Some(value) => value,
                    None => return Ok(None), // escape opened, value follows
                };
                if self.payload.push(decoded).is_err() {
                    return Err(self.fail(byte, FrameError::Overflow));
                }
                if self.payload.len() == self.expected {
                    self.state = State::Trailer;
                }
                Ok(None)
            }
            State::Notice => {
                if byte == END_MARKER && !self.escape {
                    self.state = State::Idle;
                    return Ok(Some(FrameKind::Notice));
                }
                let decoded = match self.unstuff(byte)? {
                    Some(value) => value,
                    None => return Ok(None),
                };
                if self.payload.push(decoded).is_err() {
                    return Err(self.fail(byte, FrameError::Overflow));
                }
                Ok(None)
            }
            State::Trailer => {
                if byte == END_MARKER {
                    self.state = State::Idle;
                    Ok(Some(FrameKind::Data))
                } else {
                    Err(self.fail(byte, FrameError::Malformed))
                }
            }
        }
    }

    /// Resolves one payload byte, handling the escape pair
    ///
    /// `Ok(None)` means the byte opened an escape and the caller must wait
    /// for the next one. Raw markers inside a payload are framing errors:
    /// stuffing guarantees they never occur in a well-formed frame.
    fn unstuff(&mut self, byte: u8) -> Result<Option<u8>, FrameError> {
        if self.escape {
            self.escape = false;
            return match SPECIAL_BYTE.checked_add(byte) {
                Some(value) => Ok(Some(value)),
                None => Err(self.fail(byte, FrameError::Malformed)),
            };
        }
        match byte {
            SPECIAL_BYTE => {
                self.escape = true;
                Ok(None)
            }
            START_MARKER => Err(self.fail(byte, FrameError::Truncated)),
            END_MARKER => Err(self.fail(byte, FrameError::Truncated)),
            _ => Ok(Some(byte)),
        }
    }

    /// Discards the broken frame and resynchronizes
    fn fail(&mut self, byte: u8, error: FrameError) -> FrameError {
        self.escape = false;
        self.expected = 0;
        self.payload.clear();
        // A start marker already opens the next frame
        self.state = if byte == START_MARKER {
            State::LenHigh
        } else {
            State::Idle
        };
        error
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for FrameError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FrameError::PayloadTooLarge => defmt::write!(fmt, "Payload too large"),
            FrameError::Truncated => defmt::write!(fmt, "Truncated frame"),
            FrameError::Malformed => defmt::write!(fmt, "Malformed frame"),
            FrameError::Overflow => defmt::write!(fmt, "Buffer overflow"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FrameKind {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FrameKind::Data => defmt::write!(fmt, "Data"),
            FrameKind::Notice => defmt::write!(fmt, "Notice"),
        }
    }
}
