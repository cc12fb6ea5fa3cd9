//! Peers built from different revisions of one schema, each with its own
//! registry, exchanging packets through a shared byte stream.

use std::collections::HashMap;

use tagwire_buffer::ByteBuffer;
use tagwire_frame::{FieldSpec, WireObject, WireReader, WireWriter};
use tagwire_registry::{Binding, PacketVariant, Protocol, ProtocolRegistry, RegistryError};

mod v1 {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Login {
        pub user: String,
    }

    impl WireObject for Login {
        const NAME: &'static str = "Login";

        fn fields() -> Vec<FieldSpec> {
            vec![FieldSpec::of::<String>("user")]
        }

        fn write_fields(&self, w: &mut WireWriter<'_>) -> tagwire_frame::Result<()> {
            w.write(&self.user)
        }

        fn read_fields(r: &mut WireReader<'_>) -> tagwire_frame::Result<Self> {
            Ok(Self { user: r.read()? })
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Kind {
        Login,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Packet {
        Login(Login),
    }

    impl Protocol for Packet {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            match self {
                Packet::Login(_) => Kind::Login,
            }
        }
    }

    impl PacketVariant<Packet> for Login {
        const KIND: Kind = Kind::Login;

        fn wrap(self) -> Packet {
            Packet::Login(self)
        }

        fn unwrap_ref(packet: &Packet) -> Option<&Self> {
            match packet {
                Packet::Login(login) => Some(login),
            }
        }
    }

    pub fn registry() -> ProtocolRegistry<Packet> {
        ProtocolRegistry::from_bindings(vec![Binding::framed::<Login>(10)]).unwrap()
    }
}

mod v2 {
    use super::*;

    /// `Login` with two appended fields.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Login {
        pub user: String,
        pub attempts: i32,
        pub tags: HashMap<String, String>,
    }

    impl WireObject for Login {
        const NAME: &'static str = "Login";

        fn fields() -> Vec<FieldSpec> {
            vec![
                FieldSpec::of::<String>("user"),
                FieldSpec::of::<i32>("attempts"),
                FieldSpec::of::<HashMap<String, String>>("tags"),
            ]
        }

        fn write_fields(&self, w: &mut WireWriter<'_>) -> tagwire_frame::Result<()> {
            w.write(&self.user)?;
            w.write(&self.attempts)?;
            w.write(&self.tags)
        }

        fn read_fields(r: &mut WireReader<'_>) -> tagwire_frame::Result<Self> {
            Ok(Self {
                user: r.read()?,
                attempts: r.read()?,
                tags: r.read()?,
            })
        }
    }

    /// Only exists in the newer revision.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Logout {
        pub reason: String,
    }

    impl WireObject for Logout {
        const NAME: &'static str = "Logout";

        fn fields() -> Vec<FieldSpec> {
            vec![FieldSpec::of::<String>("reason")]
        }

        fn write_fields(&self, w: &mut WireWriter<'_>) -> tagwire_frame::Result<()> {
            w.write(&self.reason)
        }

        fn read_fields(r: &mut WireReader<'_>) -> tagwire_frame::Result<Self> {
            Ok(Self { reason: r.read()? })
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Kind {
        Login,
        Logout,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Packet {
        Login(Login),
        Logout(Logout),
    }

    impl Protocol for Packet {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            match self {
                Packet::Login(_) => Kind::Login,
                Packet::Logout(_) => Kind::Logout,
            }
        }
    }

    impl PacketVariant<Packet> for Login {
        const KIND: Kind = Kind::Login;

        fn wrap(self) -> Packet {
            Packet::Login(self)
        }

        fn unwrap_ref(packet: &Packet) -> Option<&Self> {
            match packet {
                Packet::Login(login) => Some(login),
                _ => None,
            }
        }
    }

    impl PacketVariant<Packet> for Logout {
        const KIND: Kind = Kind::Logout;

        fn wrap(self) -> Packet {
            Packet::Logout(self)
        }

        fn unwrap_ref(packet: &Packet) -> Option<&Self> {
            match packet {
                Packet::Logout(logout) => Some(logout),
                _ => None,
            }
        }
    }

    pub fn registry() -> ProtocolRegistry<Packet> {
        ProtocolRegistry::from_bindings(vec![
            Binding::framed::<Login>(10),
            Binding::framed::<Logout>(11),
        ])
        .unwrap()
    }
}

fn v2_login() -> v2::Packet {
    v2::Packet::Login(v2::Login {
        user: "bob".to_string(),
        attempts: 3,
        tags: [("region".to_string(), "eu".to_string())].into_iter().collect(),
    })
}

#[test]
fn older_reader_skips_appended_fields() {
    let newer = v2::registry();
    let older = v1::registry();

    let mut buf = ByteBuffer::new();
    newer.dispatcher().write(&mut buf, &v2_login()).unwrap();
    newer.dispatcher().write(&mut buf, &v2_login()).unwrap();

    for _ in 0..2 {
        let packet = older.dispatcher().read(&mut buf).unwrap();
        assert_eq!(
            packet,
            v1::Packet::Login(v1::Login {
                user: "bob".to_string()
            })
        );
    }
    assert_eq!(buf.remaining(), 0);
}

#[test]
fn older_reader_stops_at_unknown_packet_id() {
    let newer = v2::registry();
    let older = v1::registry();

    let mut buf = ByteBuffer::new();
    let logout = v2::Packet::Logout(v2::Logout {
        reason: "idle".to_string(),
    });
    newer.dispatcher().write(&mut buf, &logout).unwrap();

    let err = older.dispatcher().read(&mut buf).unwrap_err();
    assert!(matches!(err, RegistryError::UnknownProtocolId(11)));
    assert_eq!(buf.read_offset(), 0);

    // Policy is up to the caller; the newer registry still decodes it.
    assert_eq!(newer.dispatcher().read(&mut buf).unwrap(), logout);
}

#[test]
fn newer_reader_of_older_packet_is_malformed() {
    let newer = v2::registry();
    let older = v1::registry();

    let mut buf = ByteBuffer::new();
    let login = v1::Packet::Login(v1::Login {
        user: "carol".to_string(),
    });
    older.dispatcher().write(&mut buf, &login).unwrap();

    let err = newer.dispatcher().read(&mut buf).unwrap_err();
    assert!(err.is_malformed_stream());
    assert_eq!(buf.read_offset(), 0);
}

#[test]
fn manifests_show_the_revision_gap() {
    let diff = v1::registry().manifest().diff(&v2::registry().manifest());

    assert_eq!(diff.len(), 2);
    assert!(diff[0].starts_with("id 10: Login fields differ"));
    assert!(diff[0].contains("tags: map<string,string>"));
    assert_eq!(diff[1], "id 11: Logout missing on local side");
}
