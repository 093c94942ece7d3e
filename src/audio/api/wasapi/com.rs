use windows::Win32::{
    Foundation::RPC_E_CHANGED_MODE,
    System::Com::{CoInitializeEx, CoUninitialize, COINIT_MULTITHREADED},
};

thread_local! {
    static WASAPI_COM_INIT: ComWasapi = {
        let result = unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) };
        if result.is_ok() {
            ComWasapi { uninitialize: true }
        } else if result == RPC_E_CHANGED_MODE {
            // Another apartment model already owns this thread.
            ComWasapi { uninitialize: false }
        } else {
            log::error!("Failed to initialize COM: HRESULT {}", result);
            ComWasapi { uninitialize: false }
        }
    }
}

struct ComWasapi {
    uninitialize: bool,
}

impl Drop for ComWasapi {
    #[inline]
    fn drop(&mut self) {
        if self.uninitialize {
            unsafe { CoUninitialize() }
        }
    }
}

#[inline]
pub fn com_initialize() {
    WASAPI_COM_INIT.with(|_| {})
}
