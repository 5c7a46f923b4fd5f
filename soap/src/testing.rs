//! A plain-XML stand-in for a SOAP runtime and a small service to dispatch to.
//!
//! Requests look like `<call operation="add"><int>1</int></call>`, responses like
//! `<response operation="add"><int>1</int></response>` and faults like
//! `<fault code="Sender">message</fault>`.

use std::fmt::Write;

use dt_wsdl::{FunctionDescriptor, ParameterDescriptor};
use quick_xml::escape::escape;

use super::{Call, Fault, Service, ServiceError, SoapError, SoapRuntime, SoapVersion, Value};

pub struct MockRuntime;

fn encode_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("<null/>"),
        Value::Bool(b) => write!(out, "<bool>{b}</bool>").unwrap(),
        Value::Int(i) => write!(out, "<int>{i}</int>").unwrap(),
        Value::Float(f) => write!(out, "<float>{f}</float>").unwrap(),
        Value::String(s) => write!(out, "<string>{}</string>", escape(s.as_str())).unwrap(),
        Value::Array(items) => {
            out.push_str("<array>");
            items.iter().for_each(|item| encode_value(item, out));
            out.push_str("</array>");
        }
        Value::Struct(members) => {
            out.push_str("<struct>");
            for (name, member) in members {
                write!(out, r#"<member name="{}">"#, escape(name.as_str())).unwrap();
                encode_value(member, out);
                out.push_str("</member>");
            }
            out.push_str("</struct>");
        }
    }
}

fn decode_value(node: roxmltree::Node) -> Result<Value, SoapError> {
    let text = node.text().unwrap_or_default();
    let invalid = |e: &dyn std::fmt::Display| SoapError::Decode(format!("{}: {e}", node.tag_name().name()));
    Ok(match node.tag_name().name() {
        "null" => Value::Null,
        "bool" => Value::Bool(text == "true"),
        "int" => Value::Int(text.parse().map_err(|e| invalid(&e))?),
        "float" => Value::Float(text.parse().map_err(|e| invalid(&e))?),
        "string" => Value::String(text.to_owned()),
        "array" => Value::Array(
            node.children()
                .filter(|n| n.is_element())
                .map(decode_value)
                .collect::<Result<_, _>>()?,
        ),
        "struct" => Value::Struct(
            node.children()
                .filter(|n| n.is_element())
                .map(|member| {
                    let name = member.attribute("name").unwrap_or_default().to_owned();
                    let value = match member.first_element_child() {
                        Some(child) => decode_value(child)?,
                        None => Value::Null,
                    };
                    Ok((name, value))
                })
                .collect::<Result<_, SoapError>>()?,
        ),
        other => return Err(SoapError::Decode(format!("unknown value tag {other}"))),
    })
}

fn parse(xml: &str) -> Result<roxmltree::Document, SoapError> {
    roxmltree::Document::parse(xml).map_err(|e| SoapError::Decode(e.to_string()))
}

fn envelope(tag: &str, operation: &str, values: &[Value]) -> String {
    let mut out = format!(r#"<{tag} operation="{}""#, escape(operation));
    if values.is_empty() {
        out.push_str("/>");
    } else {
        out.push('>');
        values.iter().for_each(|value| encode_value(value, &mut out));
        write!(out, "</{tag}>").unwrap();
    }
    out
}

impl SoapRuntime for MockRuntime {
    fn decode_request(&self, request: &str) -> Result<Call, SoapError> {
        let document = parse(request)?;
        let root = document.root_element();
        let operation = root
            .attribute("operation")
            .filter(|_| root.has_tag_name("call"))
            .ok_or_else(|| SoapError::Decode("not a call".into()))?;
        let arguments = root
            .children()
            .filter(|n| n.is_element())
            .map(decode_value)
            .collect::<Result<_, _>>()?;
        Ok(Call::new(operation, arguments))
    }

    fn encode_response(
        &self,
        operation: &str,
        result: &Value,
        _version: SoapVersion,
    ) -> Result<String, SoapError> {
        Ok(envelope("response", operation, std::slice::from_ref(result)))
    }

    fn encode_fault(&self, fault: &Fault, _version: SoapVersion) -> Result<String, SoapError> {
        Ok(format!(
            r#"<fault code="{}">{}</fault>"#,
            escape(fault.code.as_str()),
            escape(fault.message.as_str())
        ))
    }

    fn encode_request(&self, call: &Call, _version: SoapVersion) -> Result<String, SoapError> {
        Ok(envelope("call", &call.operation, &call.arguments))
    }

    fn decode_response(&self, response: &str) -> Result<Result<Value, Fault>, SoapError> {
        let document = parse(response)?;
        let root = document.root_element();
        match root.tag_name().name() {
            "response" => Ok(Ok(match root.first_element_child() {
                Some(child) => decode_value(child)?,
                None => Value::Null,
            })),
            "fault" => Ok(Err(Fault::new(
                root.attribute("code").unwrap_or_default(),
                root.text().unwrap_or_default(),
            ))),
            other => Err(SoapError::Decode(format!("unexpected response {other}"))),
        }
    }
}

/// Exposes `add(x: int, y: int): int`; missing operands count as zero.
pub struct Calculator;

impl Service for Calculator {
    fn operations(&self) -> Vec<FunctionDescriptor> {
        vec![FunctionDescriptor::new("add")
            .with_parameter(ParameterDescriptor::new("x", "int"))
            .with_parameter(ParameterDescriptor::new("y", "int"))
            .returning("int")]
    }

    fn invoke(&self, operation: &str, arguments: Vec<Value>) -> Result<Value, ServiceError> {
        match operation {
            "add" => Ok(Value::Int(
                arguments.iter().map(|a| a.as_int().unwrap_or(0)).sum(),
            )),
            _ => Err(ServiceError::new("BadMethodCall", operation)),
        }
    }
}
