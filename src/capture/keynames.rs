//! evdev key and button codes mapped to the symbols stored in the session.

static KEY_NAMES: phf::Map<u16, &'static str> = phf::phf_map! {
    1u16 => "esc",
    2u16 => "1",
    3u16 => "2",
    4u16 => "3",
    5u16 => "4",
    6u16 => "5",
    7u16 => "6",
    8u16 => "7",
    9u16 => "8",
    10u16 => "9",
    11u16 => "0",
    12u16 => "minus",
    13u16 => "equal",
    14u16 => "backspace",
    15u16 => "tab",
    16u16 => "q",
    17u16 => "w",
    18u16 => "e",
    19u16 => "r",
    20u16 => "t",
    21u16 => "y",
    22u16 => "u",
    23u16 => "i",
    24u16 => "o",
    25u16 => "p",
    26u16 => "leftbrace",
    27u16 => "rightbrace",
    28u16 => "enter",
    29u16 => "leftctrl",
    30u16 => "a",
    31u16 => "s",
    32u16 => "d",
    33u16 => "f",
    34u16 => "g",
    35u16 => "h",
    36u16 => "j",
    37u16 => "k",
    38u16 => "l",
    39u16 => "semicolon",
    40u16 => "apostrophe",
    41u16 => "grave",
    42u16 => "leftshift",
    43u16 => "backslash",
    44u16 => "z",
    45u16 => "x",
    46u16 => "c",
    47u16 => "v",
    48u16 => "b",
    49u16 => "n",
    50u16 => "m",
    51u16 => "comma",
    52u16 => "dot",
    53u16 => "slash",
    54u16 => "rightshift",
    55u16 => "kpasterisk",
    56u16 => "leftalt",
    57u16 => "space",
    58u16 => "capslock",
    59u16 => "f1",
    60u16 => "f2",
    61u16 => "f3",
    62u16 => "f4",
    63u16 => "f5",
    64u16 => "f6",
    65u16 => "f7",
    66u16 => "f8",
    67u16 => "f9",
    68u16 => "f10",
    69u16 => "numlock",
    70u16 => "scrolllock",
    71u16 => "kp7",
    72u16 => "kp8",
    73u16 => "kp9",
    74u16 => "kpminus",
    75u16 => "kp4",
    76u16 => "kp5",
    77u16 => "kp6",
    78u16 => "kpplus",
    79u16 => "kp1",
    80u16 => "kp2",
    81u16 => "kp3",
    82u16 => "kp0",
    83u16 => "kpdot",
    87u16 => "f11",
    88u16 => "f12",
    96u16 => "kpenter",
    97u16 => "rightctrl",
    98u16 => "kpslash",
    99u16 => "sysrq",
    100u16 => "rightalt",
    102u16 => "home",
    103u16 => "up",
    104u16 => "pageup",
    105u16 => "left",
    106u16 => "right",
    107u16 => "end",
    108u16 => "down",
    109u16 => "pagedown",
    110u16 => "insert",
    111u16 => "delete",
    119u16 => "pause",
    125u16 => "leftmeta",
    126u16 => "rightmeta",
    127u16 => "compose",
};

static BUTTON_NAMES: phf::Map<u16, &'static str> = phf::phf_map! {
    0x110u16 => "left",
    0x111u16 => "right",
    0x112u16 => "middle",
    0x113u16 => "side",
    0x114u16 => "extra",
    0x115u16 => "forward",
    0x116u16 => "back",
    0x117u16 => "task",
};

/// First code of the `BTN_*` range; everything below is a keyboard key.
pub const BTN_MISC: u16 = 0x100;
pub const BTN_LEFT: u16 = 0x110;
pub const BTN_TASK: u16 = 0x117;

/// Key symbol for a keyboard code, `"unknown"` when the table has no entry.
#[inline]
pub fn key_symbol(code: u16) -> &'static str {
    KEY_NAMES.get(&code).copied().unwrap_or(crate::event::UNKNOWN_SYMBOL)
}

/// Button name for a mouse button code, `None` outside `BTN_LEFT..=BTN_TASK`.
#[inline]
pub fn button_name(code: u16) -> Option<&'static str> {
    BUTTON_NAMES.get(&code).copied()
}

/// Resolve a key identifier (symbol, `KEY_*` name, or numeric code) to the
/// symbol the decoder emits. The lookup is case-insensitive.
pub fn resolve_key_symbol(identifier: &str) -> Option<&'static str> {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    let normalized = lower.strip_prefix("key_").unwrap_or(&lower);
    if let Some(name) = KEY_NAMES.values().copied().find(|name| *name == normalized) {
        return Some(name);
    }

    // Digit keys are symbols, so numbers only reach here as raw codes.
    trimmed.parse::<u16>().ok().and_then(|code| KEY_NAMES.get(&code).copied())
}
