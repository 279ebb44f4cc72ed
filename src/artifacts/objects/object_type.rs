use crate::artifacts::objects::object::MalformedObject;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Consume the `<type> <size>\0` envelope and return the object type
    pub fn parse_object_type(
        data_reader: &mut impl BufRead,
    ) -> Result<ObjectType, MalformedObject> {
        let mut object_type = Vec::new();
        data_reader
            .read_until(b' ', &mut object_type)
            .map_err(|e| MalformedObject(format!("unreadable header: {e}")))?;

        let object_type = String::from_utf8(object_type)
            .map_err(|_| MalformedObject("object type is not valid UTF-8".to_string()))?;
        let object_type = object_type.trim();

        // skip the size part
        let mut size = Vec::new();
        data_reader
            .read_until(b'\0', &mut size)
            .map_err(|e| MalformedObject(format!("unreadable header: {e}")))?;

        ObjectType::try_from(object_type)
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = MalformedObject;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            other => Err(MalformedObject(format!("invalid object type '{other}'"))),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
