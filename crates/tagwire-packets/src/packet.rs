//! Packet structs of the reference protocol.

use std::collections::{HashMap, HashSet};

use tagwire_frame::{object_field, FieldSpec, Result, WireObject, WireReader, WireWriter};

/// A packet with no fields. Always framed with the untracked sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmptyObject;

impl WireObject for EmptyObject {
    const NAME: &'static str = "EmptyObject";

    fn fields() -> Vec<FieldSpec> {
        Vec::new()
    }

    fn write_fields(&self, _w: &mut WireWriter<'_>) -> Result<()> {
        Ok(())
    }

    fn read_fields(_r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectB {
    pub flag: bool,
}

impl WireObject for ObjectB {
    const NAME: &'static str = "ObjectB";

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::of::<bool>("flag")]
    }

    fn write_fields(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.write(&self.flag)
    }

    fn read_fields(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self { flag: r.read()? })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectA {
    pub a: i32,
    pub m: HashMap<i32, String>,
    pub object_b: Option<ObjectB>,
}

impl WireObject for ObjectA {
    const NAME: &'static str = "ObjectA";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::of::<i32>("a"),
            FieldSpec::of::<HashMap<i32, String>>("m"),
            FieldSpec::of::<Option<ObjectB>>("objectB"),
        ]
    }

    fn write_fields(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.write(&self.a)?;
        w.write(&self.m)?;
        w.write(&self.object_b)
    }

    fn read_fields(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            a: r.read()?,
            m: r.read()?,
            object_b: r.read()?,
        })
    }
}

// ObjectA appears inside lists and maps.
object_field!(ObjectA);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleObject {
    pub c: i32,
    pub g: bool,
}

impl WireObject for SimpleObject {
    const NAME: &'static str = "SimpleObject";

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::of::<i32>("c"), FieldSpec::of::<bool>("g")]
    }

    fn write_fields(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.write(&self.c)?;
        w.write(&self.g)
    }

    fn read_fields(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            c: r.read()?,
            g: r.read()?,
        })
    }
}

/// Every primitive, a string, an optional object and the flat collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalObject {
    pub a: i8,
    pub b: i16,
    pub c: i32,
    pub d: i64,
    pub e: f32,
    pub f: f64,
    pub g: bool,
    pub jj: String,
    pub kk: Option<ObjectA>,
    pub l: Vec<i32>,
    pub ll: Vec<i64>,
    pub lll: Vec<ObjectA>,
    pub llll: Vec<String>,
    pub m: HashMap<i32, String>,
    pub mm: HashMap<i32, ObjectA>,
    pub s: HashSet<i32>,
    pub ssss: HashSet<String>,
}

impl WireObject for NormalObject {
    const NAME: &'static str = "NormalObject";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::of::<i8>("a"),
            FieldSpec::of::<i16>("b"),
            FieldSpec::of::<i32>("c"),
            FieldSpec::of::<i64>("d"),
            FieldSpec::of::<f32>("e"),
            FieldSpec::of::<f64>("f"),
            FieldSpec::of::<bool>("g"),
            FieldSpec::of::<String>("jj"),
            FieldSpec::of::<Option<ObjectA>>("kk"),
            FieldSpec::of::<Vec<i32>>("l"),
            FieldSpec::of::<Vec<i64>>("ll"),
            FieldSpec::of::<Vec<ObjectA>>("lll"),
            FieldSpec::of::<Vec<String>>("llll"),
            FieldSpec::of::<HashMap<i32, String>>("m"),
            FieldSpec::of::<HashMap<i32, ObjectA>>("mm"),
            FieldSpec::of::<HashSet<i32>>("s"),
            FieldSpec::of::<HashSet<String>>("ssss"),
        ]
    }

    fn write_fields(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.write(&self.a)?;
        w.write(&self.b)?;
        w.write(&self.c)?;
        w.write(&self.d)?;
        w.write(&self.e)?;
        w.write(&self.f)?;
        w.write(&self.g)?;
        w.write(&self.jj)?;
        w.write(&self.kk)?;
        w.write(&self.l)?;
        w.write(&self.ll)?;
        w.write(&self.lll)?;
        w.write(&self.llll)?;
        w.write(&self.m)?;
        w.write(&self.mm)?;
        w.write(&self.s)?;
        w.write(&self.ssss)
    }

    fn read_fields(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            a: r.read()?,
            b: r.read()?,
            c: r.read()?,
            d: r.read()?,
            e: r.read()?,
            f: r.read()?,
            g: r.read()?,
            jj: r.read()?,
            kk: r.read()?,
            l: r.read()?,
            ll: r.read()?,
            lll: r.read()?,
            llll: r.read()?,
            m: r.read()?,
            mm: r.read()?,
            s: r.read()?,
            ssss: r.read()?,
        })
    }
}

/// Nested collections of every shape the field encodings support.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexObject {
    pub a: i8,
    pub aa: i16,
    pub b: i32,
    pub c: i64,
    pub d: f32,
    pub e: f64,
    pub f: bool,
    pub jj: String,
    pub kk: Option<ObjectA>,
    pub l: Vec<i32>,
    pub ll: Vec<Vec<Vec<i32>>>,
    pub lll: Vec<Vec<ObjectA>>,
    pub llll: Vec<String>,
    pub lllll: Vec<HashMap<i32, String>>,
    pub m: HashMap<i32, String>,
    pub mm: HashMap<i32, ObjectA>,
    pub mmmm: HashMap<i32, Vec<Vec<ObjectA>>>,
    pub mmmmm: HashMap<String, HashSet<i64>>,
    pub s: HashSet<i32>,
    pub ss: Vec<HashSet<String>>,
    pub my_compatible: i32,
    pub my_object: Option<ObjectA>,
}

impl WireObject for ComplexObject {
    const NAME: &'static str = "ComplexObject";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::of::<i8>("a"),
            FieldSpec::of::<i16>("aa"),
            FieldSpec::of::<i32>("b"),
            FieldSpec::of::<i64>("c"),
            FieldSpec::of::<f32>("d"),
            FieldSpec::of::<f64>("e"),
            FieldSpec::of::<bool>("f"),
            FieldSpec::of::<String>("jj"),
            FieldSpec::of::<Option<ObjectA>>("kk"),
            FieldSpec::of::<Vec<i32>>("l"),
            FieldSpec::of::<Vec<Vec<Vec<i32>>>>("ll"),
            FieldSpec::of::<Vec<Vec<ObjectA>>>("lll"),
            FieldSpec::of::<Vec<String>>("llll"),
            FieldSpec::of::<Vec<HashMap<i32, String>>>("lllll"),
            FieldSpec::of::<HashMap<i32, String>>("m"),
            FieldSpec::of::<HashMap<i32, ObjectA>>("mm"),
            FieldSpec::of::<HashMap<i32, Vec<Vec<ObjectA>>>>("mmmm"),
            FieldSpec::of::<HashMap<String, HashSet<i64>>>("mmmmm"),
            FieldSpec::of::<HashSet<i32>>("s"),
            FieldSpec::of::<Vec<HashSet<String>>>("ss"),
            FieldSpec::of::<i32>("myCompatible"),
            FieldSpec::of::<Option<ObjectA>>("myObject"),
        ]
    }

    fn write_fields(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.write(&self.a)?;
        w.write(&self.aa)?;
        w.write(&self.b)?;
        w.write(&self.c)?;
        w.write(&self.d)?;
        w.write(&self.e)?;
        w.write(&self.f)?;
        w.write(&self.jj)?;
        w.write(&self.kk)?;
        w.write(&self.l)?;
        w.write(&self.ll)?;
        w.write(&self.lll)?;
        w.write(&self.llll)?;
        w.write(&self.lllll)?;
        w.write(&self.m)?;
        w.write(&self.mm)?;
        w.write(&self.mmmm)?;
        w.write(&self.mmmmm)?;
        w.write(&self.s)?;
        w.write(&self.ss)?;
        w.write(&self.my_compatible)?;
        w.write(&self.my_object)
    }

    fn read_fields(r: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self {
            a: r.read()?,
            aa: r.read()?,
            b: r.read()?,
            c: r.read()?,
            d: r.read()?,
            e: r.read()?,
            f: r.read()?,
            jj: r.read()?,
            kk: r.read()?,
            l: r.read()?,
            ll: r.read()?,
            lll: r.read()?,
            llll: r.read()?,
            lllll: r.read()?,
            m: r.read()?,
            mm: r.read()?,
            mmmm: r.read()?,
            mmmmm: r.read()?,
            s: r.read()?,
            ss: r.read()?,
            my_compatible: r.read()?,
            my_object: r.read()?,
        })
    }
}
