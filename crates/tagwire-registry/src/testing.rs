//! Small two-packet protocol shared by the unit tests.

use tagwire_frame::{FieldSpec, WireObject, WireReader, WireWriter};

use crate::codec::{PacketVariant, Protocol};
use crate::registry::Binding;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Ping {
    pub seq: i32,
}

impl WireObject for Ping {
    const NAME: &'static str = "Ping";

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::of::<i32>("seq")]
    }

    fn write_fields(&self, w: &mut WireWriter<'_>) -> tagwire_frame::Result<()> {
        w.write(&self.seq)
    }

    fn read_fields(r: &mut WireReader<'_>) -> tagwire_frame::Result<Self> {
        Ok(Self { seq: r.read()? })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Chat {
    pub from: String,
    pub text: String,
    pub ping: Option<Ping>,
}

impl WireObject for Chat {
    const NAME: &'static str = "Chat";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::of::<String>("from"),
            FieldSpec::of::<String>("text"),
            FieldSpec::of::<Option<Ping>>("ping"),
        ]
    }

    fn write_fields(&self, w: &mut WireWriter<'_>) -> tagwire_frame::Result<()> {
        w.write(&self.from)?;
        w.write(&self.text)?;
        w.write(&self.ping)
    }

    fn read_fields(r: &mut WireReader<'_>) -> tagwire_frame::Result<Self> {
        Ok(Self {
            from: r.read()?,
            text: r.read()?,
            ping: r.read()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TestKind {
    Ping,
    Chat,
    Orphan,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TestPacket {
    Ping(Ping),
    Chat(Chat),
    Orphan,
}

impl Protocol for TestPacket {
    type Kind = TestKind;

    fn kind(&self) -> TestKind {
        match self {
            TestPacket::Ping(_) => TestKind::Ping,
            TestPacket::Chat(_) => TestKind::Chat,
            TestPacket::Orphan => TestKind::Orphan,
        }
    }
}

impl PacketVariant<TestPacket> for Ping {
    const KIND: TestKind = TestKind::Ping;

    fn wrap(self) -> TestPacket {
        TestPacket::Ping(self)
    }

    fn unwrap_ref(packet: &TestPacket) -> Option<&Self> {
        match packet {
            TestPacket::Ping(ping) => Some(ping),
            _ => None,
        }
    }
}

impl PacketVariant<TestPacket> for Chat {
    const KIND: TestKind = TestKind::Chat;

    fn wrap(self) -> TestPacket {
        TestPacket::Chat(self)
    }

    fn unwrap_ref(packet: &TestPacket) -> Option<&Self> {
        match packet {
            TestPacket::Chat(chat) => Some(chat),
            _ => None,
        }
    }
}

/// `Ping` at id 1, `Chat` at id 7. `Orphan` stays unbound.
pub(crate) fn bindings() -> Vec<Binding<TestPacket>> {
    vec![Binding::framed::<Ping>(1), Binding::framed::<Chat>(7)]
}

pub(crate) fn chat(text: &str) -> TestPacket {
    TestPacket::Chat(Chat {
        from: "alice".to_string(),
        text: text.to_string(),
        ping: Some(Ping { seq: 3 }),
    })
}
