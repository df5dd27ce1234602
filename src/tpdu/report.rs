// ABOUTME: TP-PI (GSM 03.40 9.2.3.27) and the optional PID/DCS/UDL/UD tail shared by the reports
// ABOUTME: Bits 0-2 of the indicator flag which of the optional fields follow

use super::{build_user_data, coding_of, put_user_data, read_user_data, resolve_dcs};
use crate::codec::{CodecError, decode_remaining, decode_u8};
use crate::datatypes::{Coding, Content, UserData, UserDataHeader};
use bytes::{BufMut, Bytes, BytesMut};
use std::io::Cursor;

const PROTOCOL_ID: u8 = 0b001;
const DATA_CODING: u8 = 0b010;
const USER_DATA_LENGTH: u8 = 0b100;

/// Optional parameters of SMS-SUBMIT-REPORT and SMS-STATUS-REPORT
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportParameters {
    pub protocol_id: Option<u8>,
    pub dcs: Option<u8>,
    /// TP-UDL and the user data it measures
    pub user_data: Option<(u8, Bytes)>,
}

impl ReportParameters {
    /// TP-Parameter-Indicator octet for the fields present
    pub fn indicator(&self) -> u8 {
        let mut indicator = 0;
        if self.protocol_id.is_some() {
            indicator |= PROTOCOL_ID;
        }
        if self.dcs.is_some() {
            indicator |= DATA_CODING;
        }
        if self.user_data.is_some() {
            indicator |= USER_DATA_LENGTH;
        }
        indicator
    }

    /// Lay out logical report fields; returns the parameters and TP-UDHI
    ///
    /// TP-DCS is only included when given explicitly or when the alphabet is
    /// not the default one.
    pub fn build(
        protocol_id: Option<u8>,
        dcs: Option<u8>,
        coding: Coding,
        header: Option<&UserDataHeader>,
        content: Option<&Content>,
    ) -> Result<(Self, bool), CodecError> {
        let (octet, coding) = resolve_dcs(dcs, coding)?;
        let dcs = (dcs.is_some() || octet != 0).then_some(octet);

        if content.is_none() && header.is_none() {
            return Ok((
                Self {
                    protocol_id,
                    dcs,
                    user_data: None,
                },
                false,
            ));
        }

        let empty = Content::default();
        let (encoded, udhi) = build_user_data(content.unwrap_or(&empty), coding, header)?;
        Ok((
            Self {
                protocol_id,
                dcs,
                user_data: Some((encoded.length, encoded.buffer)),
            },
            udhi,
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.indicator() == 0
    }

    /// Read the fields flagged by `indicator`; user data runs to the end of the PDU
    pub fn decode_fields(buf: &mut Cursor<&[u8]>, indicator: u8) -> Result<Self, CodecError> {
        let protocol_id = match indicator & PROTOCOL_ID {
            0 => None,
            _ => Some(decode_u8(buf)?),
        };
        let dcs = match indicator & DATA_CODING {
            0 => None,
            _ => Some(decode_u8(buf)?),
        };
        let user_data = match indicator & USER_DATA_LENGTH {
            0 => None,
            _ => Some((decode_u8(buf)?, decode_remaining(buf))),
        };

        Ok(Self {
            protocol_id,
            dcs,
            user_data,
        })
    }

    /// Write the present fields, without the indicator itself
    pub fn encode_fields(&self, buf: &mut BytesMut) {
        if let Some(protocol_id) = self.protocol_id {
            buf.put_u8(protocol_id);
        }
        if let Some(dcs) = self.dcs {
            buf.put_u8(dcs);
        }
        if let Some((length, data)) = &self.user_data {
            put_user_data(buf, *length, data);
        }
    }

    /// Alphabet of the user data; an absent TP-DCS means the default alphabet
    pub fn coding(&self) -> Result<Coding, CodecError> {
        self.dcs.map_or(Ok(Coding::Default), coding_of)
    }

    /// Decoded user data, `None` when TP-UDL was not flagged
    pub fn content(&self, udhi: bool) -> Result<Option<UserData>, CodecError> {
        match &self.user_data {
            Some((length, data)) => Ok(Some(read_user_data(data, *length, self.coding()?, udhi)?)),
            None => Ok(None),
        }
    }
}
