use coreaudio_sys::OSStatus;

/// Packs a four character code the way the CoreAudio headers spell selectors.
#[inline(always)]
pub(crate) const fn fourcc(code: &[u8; 4]) -> u32 {
    ((code[0] as u32) << 24) | ((code[1] as u32) << 16) | ((code[2] as u32) << 8) | code[3] as u32
}

#[inline(always)]
pub(crate) fn status_name(status: OSStatus) -> &'static str {
    const NOT_RUNNING: OSStatus = fourcc(b"stop") as OSStatus;
    const UNSPECIFIED: OSStatus = fourcc(b"what") as OSStatus;
    const UNKNOWN_PROPERTY: OSStatus = fourcc(b"who?") as OSStatus;
    const BAD_PROPERTY_SIZE: OSStatus = fourcc(b"!siz") as OSStatus;
    const ILLEGAL_OPERATION: OSStatus = fourcc(b"nope") as OSStatus;
    const BAD_OBJECT: OSStatus = fourcc(b"!obj") as OSStatus;
    const BAD_DEVICE: OSStatus = fourcc(b"!dev") as OSStatus;
    const BAD_STREAM: OSStatus = fourcc(b"!str") as OSStatus;
    const UNSUPPORTED_OPERATION: OSStatus = fourcc(b"unop") as OSStatus;
    const NOT_READY: OSStatus = fourcc(b"nrdy") as OSStatus;
    const PERMISSIONS: OSStatus = fourcc(b"!hog") as OSStatus;

    match status {
        0 => "kAudioHardwareNoError",
        NOT_RUNNING => "kAudioHardwareNotRunningError",
        UNSPECIFIED => "kAudioHardwareUnspecifiedError",
        UNKNOWN_PROPERTY => "kAudioHardwareUnknownPropertyError",
        BAD_PROPERTY_SIZE => "kAudioHardwareBadPropertySizeError",
        ILLEGAL_OPERATION => "kAudioHardwareIllegalOperationError",
        BAD_OBJECT => "kAudioHardwareBadObjectError",
        BAD_DEVICE => "kAudioHardwareBadDeviceError",
        BAD_STREAM => "kAudioHardwareBadStreamError",
        UNSUPPORTED_OPERATION => "kAudioHardwareUnsupportedOperationError",
        NOT_READY => "kAudioHardwareNotReadyError",
        PERMISSIONS => "kAudioDevicePermissionsError",
        _ => "Unknown error",
    }
}
