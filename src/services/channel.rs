use serde::ser::{Serialize, SerializeMap, Serializer};

/// Interaction channels reported in customer summaries. Events outside this
/// set are not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Email,
    Call,
    Bird,
}

impl Channel {
    pub const COUNT: usize = 3;

    /// Reporting order
    pub const ALL: [Channel; Channel::COUNT] = [Channel::Email, Channel::Call, Channel::Bird];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "Email",
            Channel::Call => "Call",
            Channel::Bird => "Bird",
        }
    }

    /// The single lookup from stored event names to channels
    pub fn from_event(event: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|channel| channel.as_str() == event)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Interaction count per channel, zero unless storage reported otherwise
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelCounts {
    counts: [i64; Channel::COUNT],
}

impl ChannelCounts {
    pub fn get(&self, channel: Channel) -> i64 {
        self.counts[channel.index()]
    }

    pub fn set(&mut self, channel: Channel, count: i64) {
        self.counts[channel.index()] = count;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, i64)> + '_ {
        Channel::ALL.into_iter().map(|channel| (channel, self.get(channel)))
    }
}

impl Serialize for ChannelCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Channel::COUNT))?;
        for (channel, count) in self.iter() {
            map.serialize_entry(channel.as_str(), &count)?;
        }
        map.end()
    }
}
