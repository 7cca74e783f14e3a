use std::collections::HashMap;
use std::rc::Rc;

use super::value::StringValue;

/// Process wide canonical strings. Property keys are always built from
/// interned strings so that key comparison can lean on cheap content
/// equality instead of allocating.
pub struct InternedStrings {
    // Map from utf8 strs to their canonical interned string values
    str_cache: HashMap<String, Rc<StringValue>>,
}

impl InternedStrings {
    pub fn new() -> InternedStrings {
        InternedStrings { str_cache: HashMap::new() }
    }

    pub fn get_str(&mut self, str: &str) -> Rc<StringValue> {
        match self.str_cache.get(str) {
            Some(interned_string) => interned_string.clone(),
            None => {
                let string_value = Rc::new(StringValue::new(String::from(str)));
                self.str_cache
                    .insert(String::from(str), string_value.clone());

                string_value
            }
        }
    }
}
