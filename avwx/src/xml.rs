// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Push-style XML event source backed by `quick-xml`.
//!
//! The METAR and TAF decoders are state machines that consume a closed set
//! of events in document order: element start (with attributes), element
//! end, and text. This module adapts the pull-based `quick-xml` reader to
//! that push contract. A reader error surfaces as
//! [`Error::MalformedDocument`]; an error returned by the handler aborts
//! the drive immediately.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::Error;

/// Receiver for XML events in document order.
pub(crate) trait SaxHandler {
    fn element_start(
        &mut self,
        name: &str,
        attributes: &HashMap<String, String>,
    ) -> Result<(), Error>;

    fn element_end(&mut self, name: &str) -> Result<(), Error>;

    fn text(&mut self, fragment: &str);
}

/// Streams all events of `data` into `handler`.
///
/// Empty elements (`<sky_condition .../>`) are reported as a start
/// immediately followed by an end, so handlers never need to distinguish
/// the two element forms.
pub(crate) fn drive<H: SaxHandler>(data: &[u8], handler: &mut H) -> Result<(), Error> {
    let mut reader = Reader::from_reader(data);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = std::str::from_utf8(e.name().as_ref())?.to_string();
                let attributes = collect_attributes(&e)?;
                handler.element_start(&name, &attributes)?;
            }
            Event::Empty(e) => {
                let name = std::str::from_utf8(e.name().as_ref())?.to_string();
                let attributes = collect_attributes(&e)?;
                handler.element_start(&name, &attributes)?;
                handler.element_end(&name)?;
            }
            Event::End(e) => {
                let name = std::str::from_utf8(e.name().as_ref())?.to_string();
                handler.element_end(&name)?;
            }
            Event::Text(t) => {
                let fragment = t.unescape()?;
                handler.text(&fragment);
            }
            Event::CData(t) => {
                let bytes = t.into_inner();
                handler.text(std::str::from_utf8(&bytes)?);
            }
            Event::Eof => break,
            _ => (),
        }
    }

    Ok(())
}

fn collect_attributes(e: &BytesStart) -> Result<HashMap<String, String>, Error> {
    let mut attributes = HashMap::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}
