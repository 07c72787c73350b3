/// Declares a table of operations.
///
/// Each row `wrapper: Request => Response, "WireName";` implements
/// [`Method`](crate::Method) for `Request` and emits `pub fn wrapper(ctx, rt, req)`.
/// The whole table is also emitted as `pub const CATALOG: &[MethodInfo]`.
///
/// ```ignore
/// ironvim_soap::define_methods! {
///     login: Login => LoginResponse, "Login";
///     logout: Logout => LogoutResponse, "Logout";
/// }
/// ```
#[macro_export]
macro_rules! define_methods {
    (
        $(
            $(#[$meta:meta])*
            $wrapper:ident : $req:ty => $res:ty, $wire:literal;
        )*
    ) => {
        $(
            impl $crate::Method for $req {
                const NAME: &'static str = $wire;
                const RESPONSE_TAG: &'static str = concat!($wire, "Response");
                type Response = $res;
            }

            #[doc = concat!("Invokes `", $wire, "`.")]
            $(#[$meta])*
            pub fn $wrapper<R>(
                ctx: &$crate::Context,
                rt: &R,
                req: $req,
            ) -> Result<$res, $crate::SoapError>
            where
                R: $crate::RoundTripper + ?Sized,
            {
                $crate::invoke(ctx, rt, req)
            }
        )*

        pub const CATALOG: &[$crate::MethodInfo] = &[
            $(
                $crate::MethodInfo {
                    name: $wire,
                    request_type: stringify!($req),
                    response_tag: concat!($wire, "Response"),
                },
            )*
        ];
    };
}
