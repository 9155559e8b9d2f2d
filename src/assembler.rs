//! Walks the descriptor loop of one event and folds it into an
//! [`EventRecord`].
use crate::descriptor::{Descriptor, Tag};
use crate::event::Event;
use crate::iso_639::ISO639;
use crate::record::EventRecord;
use crate::text::{self, Fragment, Separator};

/// Text fragments collected from the descriptor loop, per category, in
/// declaration order.
pub struct Assembler {
    target: ISO639,

    names: Vec<Fragment>,
    shorts: Vec<Fragment>,
    extendeds: Vec<Fragment>,
}

impl Assembler {
    pub fn new(target: ISO639) -> Assembler {
        Assembler {
            target,
            names: Vec::new(),
            shorts: Vec::new(),
            extendeds: Vec::new(),
        }
    }

    pub fn push(&mut self, desc: &Descriptor) {
        match desc {
            Descriptor::ShortEvent(d) => {
                log::debug!("(eit) {:?}", d);
                self.names.push(Fragment::new(d.language(), d.event_name()));
                self.shorts.push(Fragment::new(d.language(), d.text()));
            }
            Descriptor::ExtendedEvent(d) => {
                log::debug!("(eit) {:?}", d);
                self.extendeds.push(Fragment::new(d.language(), d.text()));
            }
            Descriptor::Unknown(tag, data) => {
                log::debug!("(eit) unknown descriptor 0x{:02X} ({} bytes)", tag, data.len());
            }
            Descriptor::Component(..)
            | Descriptor::Content(..)
            | Descriptor::Linkage(..)
            | Descriptor::ParentalRating(..)
            | Descriptor::PDC(..) => {
                log::debug!("(eit) {:?}", desc);
            }
        }
    }

    /// Decode and merge the collected text; timing comes from `event`.
    pub fn assemble(mut self, event: &Event) -> EventRecord {
        text::decode_fragments(&mut self.names, "name");
        text::decode_fragments(&mut self.shorts, "short");
        text::decode_fragments(&mut self.extendeds, "extended");

        let name = text::merge(&self.names, self.target, Separator::Space);
        let short_description = text::merge(&self.shorts, self.target, Separator::Paragraph);
        let extended = text::merge(&self.extendeds, self.target, Separator::Paragraph);

        let name = name.trim().to_string();
        let short_description = short_description.trim().to_string();

        let description = match extended.trim() {
            "" => short_description.clone(),
            s => s.to_string(),
        };
        let description = text::fix_missing_line_breaks(&description).into_owned();

        EventRecord {
            event_id: event.event_id(),
            when: event.running_status().when(),
            start_date: event.start_date(),
            start_time: event.start_time(),
            duration: event.duration(),
            name,
            short_description,
            description,
        }
    }
}

/// Decode one `.eit` record.
///
/// Total: buffers shorter than the event header give the empty record,
/// a descriptor running past the end stops the loop and whatever was
/// collected before it is still assembled.
pub fn parse(buf: &[u8], target_language: &str) -> EventRecord {
    let event = match Event::try_new(buf) {
        Ok(event) => event,
        Err(err) => {
            log::debug!("(eit) no event: {}", err);
            return EventRecord::default();
        }
    };

    let loop_sz = buf.len() - Event::HEADER_SZ;
    if usize::from(event.descriptors_loop_length()) != loop_sz {
        log::debug!(
            "(eit) descriptors-loop-length {} but {} bytes follow the header",
            event.descriptors_loop_length(),
            loop_sz
        );
    }

    let mut assembler = Assembler::new(ISO639::target(target_language));

    for resd in event.descriptors() {
        let raw = match resd {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("(eit) descriptor loop truncated: {}", err);
                break;
            }
        };

        match raw.decode() {
            Ok(desc) => assembler.push(&desc),
            Err(err) => match raw.tag() {
                Tag::Other(..) => {}
                tag => log::warn!("(eit) skip malformed {:?} descriptor: {}", tag, err),
            },
        }
    }

    assembler.assemble(&event)
}
