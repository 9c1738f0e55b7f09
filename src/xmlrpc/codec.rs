//! `methodCall` encoding and `methodResponse` decoding.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::Event;

use super::xml_utils::XmlWriter;
use crate::core::{PaymentError, Value};

/// Render `method` and `params` as an XML-RPC `methodCall` document.
pub fn encode_call(method: &str, params: &[Value]) -> Result<String, PaymentError> {
    let mut w = XmlWriter::new()?;
    w.start_element("methodCall")?;
    w.text_element("methodName", method)?;
    w.start_element("params")?;
    for param in params {
        w.start_element("param")?;
        write_value(&mut w, param)?;
        w.end_element("param")?;
    }
    w.end_element("params")?;
    w.end_element("methodCall")?;
    w.into_string()
}

fn write_value(w: &mut XmlWriter, value: &Value) -> Result<(), PaymentError> {
    w.start_element("value")?;
    match value {
        Value::Int(i) => {
            let tag = if i32::try_from(*i).is_ok() { "int" } else { "i8" };
            w.text_element(tag, &i.to_string())?;
        }
        Value::Double(d) => {
            w.text_element("double", &format_double(*d)?)?;
        }
        Value::Bool(b) => {
            w.text_element("boolean", if *b { "1" } else { "0" })?;
        }
        Value::Str(s) => {
            w.text_element("string", s)?;
        }
        Value::Array(items) => {
            w.start_element("array")?;
            w.start_element("data")?;
            for item in items {
                write_value(w, item)?;
            }
            w.end_element("data")?;
            w.end_element("array")?;
        }
        Value::Struct(members) => {
            w.start_element("struct")?;
            for (name, member) in members {
                w.start_element("member")?;
                w.text_element("name", name)?;
                write_value(w, member)?;
                w.end_element("member")?;
            }
            w.end_element("struct")?;
        }
    }
    w.end_element("value")?;
    Ok(())
}

fn format_double(d: f64) -> Result<String, PaymentError> {
    if !d.is_finite() {
        return Err(PaymentError::Xml(format!("cannot encode double {d}")));
    }
    let s = d.to_string();
    Ok(if s.contains('.') { s } else { format!("{s}.0") })
}

/// Parse a `methodResponse` document.
///
/// A `<fault>` response becomes [`PaymentError::RemoteFault`]; a response
/// without a value is [`PaymentError::InvalidResponse`].
pub fn decode_response(xml: &str) -> Result<Value, PaymentError> {
    let mut reader = Reader::from_str(xml);
    let mut d = Decoder::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                d.open(&name)?;
            }
            Ok(Event::Empty(ref e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                d.open(&name)?;
                d.close(&name)?;
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| PaymentError::Xml(format!("XML parse error: {e}")))?;
                d.text(&text);
            }
            Ok(Event::CData(ref e)) => {
                d.text(&String::from_utf8_lossy(e));
            }
            Ok(Event::End(ref e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                d.close(&name)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(PaymentError::Xml(format!("XML parse error: {e}")));
            }
            _ => {}
        }
    }

    d.finish()
}

#[derive(Debug, Clone, Copy)]
enum Scalar {
    Int,
    Double,
    Boolean,
    Str,
    Nil,
}

impl Scalar {
    fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "int" | "i4" | "i8" => Self::Int,
            "double" => Self::Double,
            "boolean" => Self::Boolean,
            "string" | "dateTime.iso8601" | "base64" => Self::Str,
            "nil" => Self::Nil,
            _ => return None,
        })
    }

    fn convert(self, text: &str) -> Result<Value, PaymentError> {
        let invalid = || PaymentError::Xml(format!("invalid {self:?} value: {text:?}"));
        match self {
            Self::Int => text.trim().parse().map(Value::Int).map_err(|_| invalid()),
            Self::Double => text.trim().parse().map(Value::Double).map_err(|_| invalid()),
            Self::Boolean => match text.trim() {
                "1" | "true" => Ok(Value::Bool(true)),
                "0" | "false" => Ok(Value::Bool(false)),
                _ => Err(invalid()),
            },
            Self::Str => Ok(Value::Str(text.to_string())),
            Self::Nil => Ok(Value::Str(String::new())),
        }
    }
}

enum Frame {
    Value { text: String, typed: Option<Value> },
    Scalar { kind: Scalar, text: String },
    Array(Vec<Value>),
    Struct {
        members: BTreeMap<String, Value>,
        name: Option<String>,
    },
    Name(String),
}

#[derive(Default)]
struct Decoder {
    stack: Vec<Frame>,
    values: Vec<Value>,
    seen_response: bool,
    fault: bool,
}

fn unexpected(tag: &str) -> PaymentError {
    PaymentError::Xml(format!("unexpected element <{tag}>"))
}

impl Decoder {
    fn open(&mut self, tag: &str) -> Result<(), PaymentError> {
        if let Some(kind) = Scalar::from_tag(tag) {
            if !matches!(self.stack.last(), Some(Frame::Value { .. })) {
                return Err(unexpected(tag));
            }
            self.stack.push(Frame::Scalar {
                kind,
                text: String::new(),
            });
            return Ok(());
        }
        match tag {
            "methodResponse" => self.seen_response = true,
            "fault" => self.fault = true,
            "value" => self.stack.push(Frame::Value {
                text: String::new(),
                typed: None,
            }),
            "array" => self.stack.push(Frame::Array(Vec::new())),
            "struct" => self.stack.push(Frame::Struct {
                members: BTreeMap::new(),
                name: None,
            }),
            "name" => self.stack.push(Frame::Name(String::new())),
            "params" | "param" | "data" | "member" => {}
            _ => return Err(unexpected(tag)),
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(Frame::Value { text: buf, .. })
            | Some(Frame::Scalar { text: buf, .. })
            | Some(Frame::Name(buf)) => buf.push_str(text),
            _ => {}
        }
    }

    fn close(&mut self, tag: &str) -> Result<(), PaymentError> {
        if Scalar::from_tag(tag).is_some() {
            let Some(Frame::Scalar { kind, text }) = self.stack.pop() else {
                return Err(unexpected(tag));
            };
            let value = kind.convert(&text)?;
            return self.set_typed(tag, value);
        }
        match tag {
            "value" => {
                let Some(Frame::Value { text, typed }) = self.stack.pop() else {
                    return Err(unexpected(tag));
                };
                self.deliver(typed.unwrap_or(Value::Str(text)))
            }
            "array" => {
                let Some(Frame::Array(items)) = self.stack.pop() else {
                    return Err(unexpected(tag));
                };
                self.set_typed(tag, Value::Array(items))
            }
            "struct" => {
                let Some(Frame::Struct { members, .. }) = self.stack.pop() else {
                    return Err(unexpected(tag));
                };
                self.set_typed(tag, Value::Struct(members))
            }
            "name" => {
                let Some(Frame::Name(name)) = self.stack.pop() else {
                    return Err(unexpected(tag));
                };
                match self.stack.last_mut() {
                    Some(Frame::Struct { name: slot, .. }) => {
                        *slot = Some(name);
                        Ok(())
                    }
                    _ => Err(unexpected(tag)),
                }
            }
            _ => Ok(()),
        }
    }

    fn set_typed(&mut self, tag: &str, value: Value) -> Result<(), PaymentError> {
        match self.stack.last_mut() {
            Some(Frame::Value { typed, .. }) if typed.is_none() => {
                *typed = Some(value);
                Ok(())
            }
            _ => Err(unexpected(tag)),
        }
    }

    fn deliver(&mut self, value: Value) -> Result<(), PaymentError> {
        match self.stack.last_mut() {
            Some(Frame::Array(items)) => items.push(value),
            Some(Frame::Struct { members, name }) => {
                let key = name
                    .take()
                    .ok_or_else(|| PaymentError::Xml("struct member without <name>".into()))?;
                members.insert(key, value);
            }
            None => self.values.push(value),
            _ => return Err(unexpected("value")),
        }
        Ok(())
    }

    fn finish(self) -> Result<Value, PaymentError> {
        if !self.stack.is_empty() {
            return Err(PaymentError::Xml("truncated response document".into()));
        }
        if !self.seen_response {
            return Err(PaymentError::InvalidResponse(
                "missing <methodResponse> element".into(),
            ));
        }
        let Some(value) = self.values.into_iter().next() else {
            return Err(PaymentError::InvalidResponse("response carries no value".into()));
        };
        if !self.fault {
            return Ok(value);
        }
        let code = value
            .get("faultCode")
            .and_then(Value::as_i64)
            .and_then(|c| i32::try_from(c).ok())
            .ok_or_else(|| PaymentError::InvalidResponse("fault without faultCode".into()))?;
        let message = value
            .get("faultString")
            .map(Value::to_text)
            .unwrap_or_default();
        Err(PaymentError::RemoteFault { code, message })
    }
}
