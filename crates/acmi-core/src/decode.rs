//! Line Decoder (C3): turns one raw frame into a tagged `Frame` value.
//!
//! This is the sum-type redesign recommended over per-frame first-byte
//! dispatch scattered through the consumer: one function, one switch, at
//! the call site.

use crate::error::{AcmiError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// `0,<KEY>=<VAL>` reference/session header line.
    Header(Vec<(String, String)>),
    /// `#<decimal-seconds>` time tick.
    Tick(f64),
    /// `<hex-id>,<KEY>=<VAL>,...` object creation or update.
    Update { tac_id: u32, fields: Vec<(String, String)> },
    /// `-<hex-id>` object removal.
    Remove { tac_id: u32 },
}

pub fn decode(raw: &[u8]) -> Result<Frame> {
    let line = std::str::from_utf8(raw)
        .map_err(|e| AcmiError::MalformedFrame(format!("invalid utf-8: {e}")))?;

    if let Some(rest) = line.strip_prefix('#') {
        let secs: f64 = rest
            .parse()
            .map_err(|_| AcmiError::MalformedFrame(format!("bad time tick: {line}")))?;
        return Ok(Frame::Tick(secs));
    }

    if let Some(rest) = line.strip_prefix('-') {
        let tac_id = u32::from_str_radix(rest, 16)
            .map_err(|_| AcmiError::MalformedFrame(format!("bad removal id: {line}")))?;
        return Ok(Frame::Remove { tac_id });
    }

    let (id_part, rest) = line
        .split_once(',')
        .ok_or_else(|| AcmiError::MalformedFrame(format!("missing ',': {line}")))?;

    let fields = parse_kv_chunks(rest)?;

    if id_part == "0" {
        return Ok(Frame::Header(fields));
    }

    let tac_id = u32::from_str_radix(id_part, 16)
        .map_err(|_| AcmiError::MalformedFrame(format!("bad object id: {line}")))?;
    Ok(Frame::Update { tac_id, fields })
}

fn parse_kv_chunks(rest: &str) -> Result<Vec<(String, String)>> {
    rest.split(',')
        .map(|chunk| {
            chunk
                .split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| AcmiError::MalformedFrame(format!("missing '=' in: {chunk}")))
        })
        .collect()
}

/// The `T=` coordinate tuple, decoded according to its pipe count.
/// `None` entries mean the field was blank in the tuple and the previous
/// value should be retained.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coords {
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub alt: Option<f32>,
    pub roll: Option<f32>,
    pub pitch: Option<f32>,
    pub yaw: Option<f32>,
    pub u_coord: Option<f32>,
    pub v_coord: Option<f32>,
    pub heading: Option<f32>,
}

pub fn parse_coords(raw: &str) -> Result<Coords> {
    let parts: Vec<&str> = raw.split('|').collect();
    let n = parts.len();

    let pf = |i: usize| -> Result<Option<f32>> { parse_opt(parts.get(i).copied()) };
    let pd = |i: usize| -> Result<Option<f64>> { parse_opt(parts.get(i).copied()) };

    match n {
        3 => Ok(Coords {
            lon: pd(0)?,
            lat: pd(1)?,
            alt: pf(2)?,
            ..Default::default()
        }),
        5 => Ok(Coords {
            lon: pd(0)?,
            lat: pd(1)?,
            alt: pf(2)?,
            u_coord: pf(3)?,
            v_coord: pf(4)?,
            ..Default::default()
        }),
        6 => Ok(Coords {
            lon: pd(0)?,
            lat: pd(1)?,
            alt: pf(2)?,
            roll: pf(3)?,
            pitch: pf(4)?,
            yaw: pf(5)?,
            ..Default::default()
        }),
        9 => Ok(Coords {
            lon: pd(0)?,
            lat: pd(1)?,
            alt: pf(2)?,
            roll: pf(3)?,
            pitch: pf(4)?,
            yaw: pf(5)?,
            u_coord: pf(6)?,
            v_coord: pf(7)?,
            heading: pf(8)?,
        }),
        _ => Err(AcmiError::MalformedFrame(format!(
            "unexpected pipe count ({n}) in T tuple: {raw}"
        ))),
    }
}

fn parse_opt<T: std::str::FromStr>(raw: Option<&str>) -> Result<Option<T>> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| AcmiError::MalformedFrame(format!("bad numeric field: {s}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_header_line() {
        let frame = decode(b"0,ReferenceLatitude=0.0").unwrap();
        assert_eq!(
            frame,
            Frame::Header(vec![("ReferenceLatitude".to_string(), "0.0".to_string())])
        );
    }

    #[test]
    fn decodes_time_tick() {
        assert_eq!(decode(b"#1.01").unwrap(), Frame::Tick(1.01));
    }

    #[test]
    fn decodes_removal() {
        assert_eq!(decode(b"-802").unwrap(), Frame::Remove { tac_id: 0x802 });
    }

    #[test]
    fn decodes_update_with_multiple_fields() {
        let frame = decode(b"802,Name=FARP,Color=Blue").unwrap();
        assert_eq!(
            frame,
            Frame::Update {
                tac_id: 0x802,
                fields: vec![
                    ("Name".to_string(), "FARP".to_string()),
                    ("Color".to_string(), "Blue".to_string()),
                ]
            }
        );
    }

    #[test]
    fn three_field_tuple_is_lon_lat_alt() {
        let c = parse_coords("6.3596289|5.139203|342.67").unwrap();
        assert_eq!(c.lon, Some(6.3596289));
        assert_eq!(c.lat, Some(5.139203));
        assert_eq!(c.alt, Some(342.67));
    }

    #[test]
    fn empty_alt_slot_is_none() {
        let c = parse_coords("6.3596289|5.139203|").unwrap();
        assert_eq!(c.alt, None);
    }

    #[test]
    fn nine_field_tuple_decodes_all_kinematics() {
        let c = parse_coords("1|2|3|4|5|6|7|8|9").unwrap();
        assert_eq!(c.lon, Some(1.0));
        assert_eq!(c.lat, Some(2.0));
        assert_eq!(c.alt, Some(3.0));
        assert_eq!(c.roll, Some(4.0));
        assert_eq!(c.pitch, Some(5.0));
        assert_eq!(c.yaw, Some(6.0));
        assert_eq!(c.u_coord, Some(7.0));
        assert_eq!(c.v_coord, Some(8.0));
        assert_eq!(c.heading, Some(9.0));
    }

    #[test]
    fn unsupported_pipe_count_is_malformed() {
        assert!(parse_coords("1|2").is_err());
    }

    #[test]
    fn short_five_field_tuple_is_lon_lat_alt_u_v() {
        let c = parse_coords("6.6632117|4.8577435|6640.74|-57047.37|76446.19").unwrap();
        assert_eq!(c.alt, Some(6640.74));
        assert_eq!(c.u_coord, Some(-57047.37));
        assert_eq!(c.v_coord, Some(76446.19));
    }
}
