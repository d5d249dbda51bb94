// SPDX-FileCopyrightText: 2025-2026 Contributors to the VoDA project.
// SPDX-License-Identifier: Apache-2.0

//! JNI entry points for the `androidsink` library.
//!
//! The Java side loads the library, calls `nativeInit` once with the
//! application context and then drives streaming and the surface lifecycle
//! through the remaining natives. `gst_android_get_java_vm` and
//! `gst_android_get_application_class_loader` are looked up by name by the
//! statically linked androidmedia plugin, which needs them to reach the
//! camera through the Java APIs.

use std::os::raw::c_void;
use std::sync::OnceLock;

use jni::objects::{GlobalRef, JClass, JObject, JValueGen};
use jni::sys::{jint, jlong};
use jni::{JNIEnv, JavaVM};
use ndk_sys::android_LogPriority;

use voda::config::StreamConfig;

use crate::logging::{self, android_log_write};
use crate::runtime;
use crate::surface::NativeWindow;

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();
static CLASS_LOADER: OnceLock<GlobalRef> = OnceLock::new();

#[unsafe(no_mangle)]
pub extern "C" fn gst_android_get_java_vm() -> *const jni::sys::JavaVM {
    match JAVA_VM.get() {
        Some(vm) => vm.get_java_vm_pointer(),
        None => std::ptr::null(),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn gst_android_get_application_class_loader() -> jni::sys::jobject {
    match CLASS_LOADER.get() {
        Some(loader) => loader.as_obj().as_raw(),
        None => std::ptr::null_mut(),
    }
}

/// Registers the GStreamer plugins linked statically into the app.
fn register_plugins() {
    unsafe extern "C" {
        fn gst_plugin_videotestsrc_register();
        fn gst_plugin_autodetect_register();
        fn gst_plugin_opengl_register();
        fn gst_plugin_app_register();
        fn gst_plugin_coreelements_register();
        fn gst_plugin_openh264_register();
        fn gst_plugin_videoconvertscale_register();
        fn gst_plugin_androidmedia_register();
    }

    unsafe {
        gst_plugin_videotestsrc_register();
        gst_plugin_autodetect_register();
        gst_plugin_opengl_register();
        gst_plugin_app_register();
        gst_plugin_coreelements_register();
        gst_plugin_openh264_register();
        gst_plugin_videoconvertscale_register();
        gst_plugin_androidmedia_register();
    }
}

fn store_class_loader(env: &mut JNIEnv, context: &JObject) -> Option<()> {
    let loader = match env.call_method(context, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
    {
        Ok(JValueGen::Object(loader)) => loader,
        Ok(_) => {
            android_log_write(
                android_LogPriority::ANDROID_LOG_ERROR,
                logging::TAG,
                "Context.getClassLoader() did not return an object",
            );
            return None;
        }
        Err(e) => {
            android_log_write(
                android_LogPriority::ANDROID_LOG_ERROR,
                logging::TAG,
                &format!("Could not get class loader: {}", e),
            );
            return None;
        }
    };

    match env.exception_check() {
        Ok(false) => {}
        Ok(true) => {
            env.exception_describe().ok();
            env.exception_clear().ok();
            return None;
        }
        Err(e) => {
            android_log_write(
                android_LogPriority::ANDROID_LOG_ERROR,
                logging::TAG,
                &format!("Could not check for pending exception: {}", e),
            );
            return None;
        }
    }

    match env.new_global_ref(&loader) {
        Ok(global) => {
            CLASS_LOADER.set(global).ok();
            Some(())
        }
        Err(e) => {
            android_log_write(
                android_LogPriority::ANDROID_LOG_ERROR,
                logging::TAG,
                &format!("Could not create global reference to class loader: {}", e),
            );
            None
        }
    }
}

fn throw_exception(env: &mut JNIEnv, message: &str) {
    match env.find_class("java/lang/Exception") {
        Ok(class) => {
            env.throw_new(class, message).ok();
        }
        Err(e) => {
            android_log_write(
                android_LogPriority::ANDROID_LOG_ERROR,
                logging::TAG,
                &format!("Could not get Exception class: {}", e),
            );
        }
    }
}

/// Called once from `GStreamer.init()` on the Java side.
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_freedesktop_gstreamer_GStreamer_nativeInit(
    mut env: JNIEnv,
    _class: JClass,
    context: JObject,
) {
    if store_class_loader(&mut env, &context).is_none() {
        return;
    }

    logging::install();
    StreamConfig::default().apply_debug_env();

    if let Err(e) = voda::init() {
        let message = format!("GStreamer initialization failed: {}", e);
        android_log_write(android_LogPriority::ANDROID_LOG_ERROR, logging::TAG, &message);
        throw_exception(&mut env, &message);
        return;
    }

    register_plugins();
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_tw_mapacode_androidsink_MainActivity_nativeRun(
    _env: JNIEnv,
    _class: JClass,
) {
    match runtime::start(&StreamConfig::default()) {
        Ok(runtime::StartOutcome::Started) => {}
        Ok(runtime::StartOutcome::AlreadyRunning) => {
            android_log_write(
                android_LogPriority::ANDROID_LOG_INFO,
                logging::TAG,
                "Streaming is already running",
            );
        }
        Err(e) => {
            android_log_write(
                android_LogPriority::ANDROID_LOG_ERROR,
                logging::TAG,
                &format!("Could not start streaming: {}", e),
            );
        }
    }
}

/// The handle of the window the preview renders into, 0 when none is bound.
#[unsafe(no_mangle)]
pub extern "system" fn Java_tw_mapacode_androidsink_MainActivity_getVideoOverlay(
    _env: JNIEnv,
    _class: JClass,
) -> jlong {
    runtime::surface_handle() as jlong
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_tw_mapacode_androidsink_SurfaceHolderCallback_nativeSurfaceInit(
    env: JNIEnv,
    _class: JClass,
    surface: JObject,
) {
    let Some(window) = NativeWindow::from_surface(&env, &surface) else {
        android_log_write(
            android_LogPriority::ANDROID_LOG_ERROR,
            logging::TAG,
            "Could not acquire native window from surface",
        );
        return;
    };
    if let Err(e) = runtime::bind_surface(window) {
        android_log_write(
            android_LogPriority::ANDROID_LOG_ERROR,
            logging::TAG,
            &format!("Could not bind surface: {}", e),
        );
    }
}

/// Releases whichever window is currently bound.
///
/// The surface passed by the Java side is the one being destroyed; the
/// runtime already holds its own reference, so the argument is not needed.
#[unsafe(no_mangle)]
pub extern "system" fn Java_tw_mapacode_androidsink_SurfaceHolderCallback_nativeSurfaceFinalize(
    _env: JNIEnv,
    _class: JClass,
    _surface: JObject,
) {
    runtime::release_surface();
}

#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "system" fn JNI_OnLoad(jvm: JavaVM, _reserved: *mut c_void) -> jint {
    let mut env = match jvm.get_env() {
        Ok(env) => env,
        Err(e) => {
            android_log_write(
                android_LogPriority::ANDROID_LOG_ERROR,
                logging::TAG,
                &format!("Could not retrieve JNIEnv: {}", e),
            );
            return 0;
        }
    };

    let version: jint = match env.get_version() {
        Ok(version) => version.into(),
        Err(e) => {
            android_log_write(
                android_LogPriority::ANDROID_LOG_ERROR,
                logging::TAG,
                &format!("Could not retrieve JNI version: {}", e),
            );
            return 0;
        }
    };
    android_log_write(
        android_LogPriority::ANDROID_LOG_INFO,
        logging::TAG,
        &format!("JNI Version: {:#x?}", version),
    );

    if env.find_class("org/freedesktop/gstreamer/GStreamer").is_err() {
        android_log_write(
            android_LogPriority::ANDROID_LOG_ERROR,
            logging::TAG,
            "Could not retrieve class org.freedesktop.gstreamer.GStreamer",
        );
        return 0;
    }

    JAVA_VM.set(jvm).ok();
    version
}
