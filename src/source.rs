//! Recording-side seam.
//!
//! Dataset loaders live outside this crate.  All the mapper needs from one
//! recording is an identifier and its ordered channel list, which
//! [`ChannelSource`] captures.
use crate::config::MappingConfig;
use crate::error::MappingError;
use crate::kind::InputChannel;
use crate::mapping::{map_dataset_channels, ChannelMapping};

/// A recording (or any subject-level unit) that can list its channels.
pub trait ChannelSource {
    /// Identifier used in log events, e.g. a subject or file name.
    fn source_id(&self) -> String;

    /// Channels in recording order, with declared kinds where known.
    fn channels(&self) -> Vec<InputChannel>;
}

impl ChannelSource for [InputChannel] {
    fn source_id(&self) -> String {
        String::from("<channels>")
    }

    fn channels(&self) -> Vec<InputChannel> {
        self.to_vec()
    }
}

impl ChannelSource for Vec<InputChannel> {
    fn source_id(&self) -> String {
        self.as_slice().source_id()
    }

    fn channels(&self) -> Vec<InputChannel> {
        self.clone()
    }
}

/// Type-driven mapping of one source.
pub fn map_source<S: ChannelSource + ?Sized>(
    source: &S,
    cfg: &MappingConfig,
) -> Result<ChannelMapping, MappingError> {
    let id = source.source_id();
    tracing::debug!(target: "chanmap", source = %id, "mapping source");

    let mapping = map_dataset_channels(&source.channels(), cfg)?;
    if !mapping.diagnostics.is_empty() {
        tracing::info!(
            target: "chanmap",
            source = %id,
            n_diagnostics = mapping.diagnostics.len(),
            "mapped with diagnostics"
        );
    }
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ChannelKind;

    struct Subject {
        id: u32,
        chs: Vec<InputChannel>,
    }

    impl ChannelSource for Subject {
        fn source_id(&self) -> String {
            format!("subject-{}", self.id)
        }

        fn channels(&self) -> Vec<InputChannel> {
            self.chs.clone()
        }
    }

    #[test]
    fn custom_source_maps_like_its_channels() {
        let chs = vec![InputChannel::new("Cz", ChannelKind::Eeg), InputChannel::new("VEOG", ChannelKind::Eog)];
        let subject = Subject { id: 7, chs: chs.clone() };
        let a = map_source(&subject, &MappingConfig::default()).unwrap();
        let b = map_source(&chs, &MappingConfig::default()).unwrap();
        assert_eq!(a.matrix, b.matrix);
        assert_eq!(subject.source_id(), "subject-7");
    }
}
